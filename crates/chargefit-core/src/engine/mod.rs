//! # Engine Module
//!
//! The search machinery that looks for charge-increment assignments with the lowest total
//! error over a residue catalog.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search parameters, resource paths and their builders
//! - **State Tracking** ([`state`]) - Best-ever assignments and improvement histories
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Cancellation** ([`cancel`]) - A cooperative stop flag polled between blocks or generations
//! - **Error Handling** ([`error`]) - Engine-level errors wrapping the core error types
//! - **Tasks** ([`tasks`]) - The exhaustive and the evolutionary searcher
//!
//! Both searchers score candidates with a precomputed [`crate::core::scoring::Scorer`]. When
//! the `parallel` feature is enabled, candidate scoring is spread over the rayon pool while
//! results are merged in a fixed order, so every run with the same inputs reports the same
//! improvements.

pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
pub mod state;
pub mod tasks;
