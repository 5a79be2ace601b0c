use crate::cli::CheckArgs;
use crate::config::PartialChargefitConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use chargefit::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub async fn run(args: CheckArgs) -> Result<()> {
    let partial_config = PartialChargefitConfig::load(&args.catalog)?;
    let config = partial_config.merge_check(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Checking templates in {:?}",
        &config.resources.templates_dir
    );
    let result = workflows::check::run(&config, &reporter)?;
    progress_handler.clear();

    if result.report.is_consistent() {
        println!(
            "✓ All {} residue template(s) match the reference increments.",
            result.catalog.len()
        );
    } else {
        println!(
            "{} of {} residue template(s) disagree with the reference increments:",
            result.report.discrepancies.len(),
            result.catalog.len()
        );
        print!("{}", result.report);
    }

    Ok(())
}
