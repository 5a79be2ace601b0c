//! # Workflows Module
//!
//! End-to-end procedures behind the command-line subcommands.
//!
//! Each workflow loads the residue catalog and the charge domain named by its config, runs
//! one search or check, and returns a result carrying everything a front end needs to
//! render it.
//!
//! - **Exhaustive Workflow** ([`exhaustive`]) - Enumerates the tight domain and streams every
//!   candidate under the score threshold to a sink.
//! - **Evolution Workflow** ([`evolve`]) - Elitist genetic search over the wide domain.
//! - **Check Workflow** ([`check`]) - Validates the templates against the fixed reference
//!   increments without searching.

use crate::core::domain::range::ChargeDomain;
use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::ResidueCatalog;
use crate::engine::config::ResourceConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::info;

pub mod check;
pub mod evolve;
pub mod exhaustive;

/// The residue catalog and charge domain a search runs over.
pub(crate) struct Resources {
    pub catalog: ResidueCatalog,
    pub domain: ChargeDomain,
}

pub(crate) fn load_resources(
    config: &ResourceConfig,
    reporter: &ProgressReporter,
) -> Result<Resources, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let vocabulary = AtomTypeVocabulary::amber();
    let catalog = ResidueCatalog::load(&config.templates_dir, &config.selection, &vocabulary)?;
    let domain = match &config.domain_path {
        Some(path) => ChargeDomain::load(path, &vocabulary)?,
        None => ChargeDomain::amber(&vocabulary)?,
    };
    info!(
        residues = catalog.len(),
        atom_types = vocabulary.len(),
        custom_domain = config.domain_path.is_some(),
        "Resources loaded."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(Resources { catalog, domain })
}
