use crate::core::domain::range::reference_assignment;
use crate::core::models::assignment::Assignment;
use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::ResidueCatalog;
use crate::core::report::DiscrepancyReport;
use crate::engine::config::CheckConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub catalog: ResidueCatalog,
    pub reference: Assignment,
    pub report: DiscrepancyReport,
}

/// Validates every selected template against the fixed reference increments.
#[instrument(skip_all, name = "check_workflow")]
pub fn run(config: &CheckConfig, reporter: &ProgressReporter) -> Result<CheckResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Reference check",
    });
    let vocabulary = AtomTypeVocabulary::reference();
    let catalog = ResidueCatalog::load(
        &config.resources.templates_dir,
        &config.resources.selection,
        &vocabulary,
    )?;
    let reference = reference_assignment(&vocabulary)?;
    let report = DiscrepancyReport::new(&catalog, &reference)?;

    if report.is_consistent() {
        info!(residues = catalog.len(), "Every template matches the reference increments.");
    } else {
        warn!(
            mismatches = report.discrepancies.len(),
            total_error = report.total_error,
            "Templates disagree with the reference increments."
        );
    }
    reporter.report(Progress::Message(format!(
        "{} of {} template(s) disagree with the reference increments",
        report.discrepancies.len(),
        catalog.len()
    )));
    reporter.report(Progress::PhaseFinish);
    Ok(CheckResult {
        catalog,
        reference,
        report,
    })
}
