use super::load_resources;
use crate::core::models::residue::ResidueCatalog;
use crate::core::report::DiscrepancyReport;
use crate::core::scoring::Scorer;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::EvolutionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks::SearchContext;
use crate::engine::tasks::evolution::{self, EvolutionOutcome};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct EvolutionResult {
    pub outcome: EvolutionOutcome,
    pub catalog: ResidueCatalog,
    pub discrepancies: DiscrepancyReport,
}

#[instrument(skip_all, name = "evolution_workflow")]
pub fn run(
    config: &EvolutionConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<EvolutionResult, EngineError> {
    let resources = load_resources(&config.resources, reporter)?;
    let scorer = Scorer::new(&resources.catalog);
    let context = SearchContext::new(&scorer, &resources.domain, reporter, cancel);

    let outcome = evolution::run(&context, &config.search)?;
    let discrepancies = DiscrepancyReport::new(&resources.catalog, &outcome.best.assignment)?;

    info!(
        generations = outcome.generations,
        total_error = discrepancies.total_error,
        "Evolution workflow complete."
    );
    Ok(EvolutionResult {
        outcome,
        catalog: resources.catalog,
        discrepancies,
    })
}
