//! Search algorithms over the charge domains.
//!
//! Each task takes a [`SearchContext`] holding the scorer, the domain, the progress reporter
//! and the cancellation token, and returns its best-so-far result even when interrupted.

use crate::core::domain::range::ChargeDomain;
use crate::core::scoring::Scorer;
use crate::engine::cancel::CancellationToken;
use crate::engine::progress::ProgressReporter;

pub mod evolution;
pub mod exhaustive;

#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub scorer: &'a Scorer,
    pub domain: &'a ChargeDomain,
    pub reporter: &'a ProgressReporter<'a>,
    pub cancel: &'a CancellationToken,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        scorer: &'a Scorer,
        domain: &'a ChargeDomain,
        reporter: &'a ProgressReporter<'a>,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            scorer,
            domain,
            reporter,
            cancel,
        }
    }
}
