use super::load_resources;
use crate::core::models::residue::ResidueCatalog;
use crate::core::report::DiscrepancyReport;
use crate::core::scoring::Scorer;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::ExhaustiveConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks::SearchContext;
use crate::engine::tasks::exhaustive::{self, ExhaustiveOutcome};
use std::io::Write;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ExhaustiveResult {
    pub outcome: ExhaustiveOutcome,
    pub catalog: ResidueCatalog,
    /// Residues the best assignment gets wrong; `None` when nothing was visited.
    pub discrepancies: Option<DiscrepancyReport>,
}

#[instrument(skip_all, name = "exhaustive_workflow")]
pub fn run(
    config: &ExhaustiveConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
    sink: &mut dyn Write,
) -> Result<ExhaustiveResult, EngineError> {
    let resources = load_resources(&config.resources, reporter)?;
    let scorer = Scorer::new(&resources.catalog);
    let context = SearchContext::new(&scorer, &resources.domain, reporter, cancel);

    let outcome = exhaustive::run(&context, &config.search, sink)?;

    let discrepancies = outcome
        .best
        .as_ref()
        .map(|best| DiscrepancyReport::new(&resources.catalog, &best.assignment))
        .transpose()?;
    info!(
        completed = outcome.completed,
        next_index = outcome.next_index,
        "Exhaustive workflow complete."
    );
    Ok(ExhaustiveResult {
        outcome,
        catalog: resources.catalog,
        discrepancies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::fixtures;
    use crate::engine::config::ExhaustiveConfigBuilder;
    use crate::workflows::test_support::write_pinned_domain;

    #[test]
    fn enumerates_a_pinned_domain_over_real_templates() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates");
        std::fs::create_dir(&templates).unwrap();
        fixtures::write_templates(&templates, fixtures::REFERENCE_CONSISTENT);
        let domain_path = dir.path().join("domain.toml");
        write_pinned_domain(&domain_path, &["CT", "H1", "HC"]);

        let config = ExhaustiveConfigBuilder::new()
            .templates_dir(templates)
            .domain_path(Some(domain_path))
            .threshold(1)
            .build()
            .unwrap();
        let mut sink = Vec::new();
        let result = run(
            &config,
            &ProgressReporter::new(),
            &CancellationToken::new(),
            &mut sink,
        )
        .unwrap();

        assert!(result.outcome.completed);
        assert_eq!(result.outcome.visited, 27);
        let best = result.outcome.best.unwrap();
        assert_eq!(best.score, 0);
        assert!(result.discrepancies.unwrap().is_consistent());
        assert_eq!(result.outcome.hits, 1);
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("0\n["));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn missing_templates_dir_fails_before_searching() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExhaustiveConfigBuilder::new()
            .templates_dir(dir.path().join("nope"))
            .build()
            .unwrap();
        let result = run(
            &config,
            &ProgressReporter::new(),
            &CancellationToken::new(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(EngineError::Catalog { .. })));
    }
}
