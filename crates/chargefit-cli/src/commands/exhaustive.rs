use super::spawn_interrupt_listener;
use crate::cli::ExhaustiveArgs;
use crate::config::{ExhaustiveRun, PartialChargefitConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chargefit::{core::report::AssignmentTable, engine::progress::ProgressReporter, workflows};
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, warn};

/// Opens `path` for appending, creating it when missing.
fn open_output(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| CliError::Output {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(BufWriter::new(file))
}

fn progress_handler() -> CliProgressHandler {
    CliProgressHandler::new().printing_improvements()
}

pub async fn run(args: ExhaustiveArgs) -> Result<()> {
    let partial_config = PartialChargefitConfig::load(&args.catalog)?;
    info!("Merging configuration from file and CLI arguments...");
    let ExhaustiveRun { config, output } = partial_config.merge_exhaustive(&args)?;

    info!("Appending qualifying candidates to {:?}", &output);
    let mut sink = open_output(&output)?;

    let progress_handler = progress_handler();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let cancel = spawn_interrupt_listener();

    println!("Starting exhaustive search...");
    let result = tokio::task::block_in_place(|| {
        workflows::exhaustive::run(&config, &reporter, &cancel, &mut sink)
    })?;
    progress_handler.clear();

    let outcome = &result.outcome;
    println!(
        "Visited {} candidate(s) from index {}; {} below threshold {} written to {}.",
        outcome.visited,
        outcome.start_index,
        outcome.hits,
        config.search.threshold,
        output.display()
    );
    if !outcome.completed {
        warn!(next_index = outcome.next_index, "Search stopped before the end of the space.");
        println!(
            "Search stopped early. Resume with --start-index {}.",
            outcome.next_index
        );
    }

    match (&outcome.best, &result.discrepancies) {
        (Some(best), Some(report)) => {
            println!("✓ Best score {}: {}", best.score, best.assignment);
            print!(
                "{}",
                AssignmentTable::new(result.catalog.vocabulary(), &best.assignment)
            );
            print!("{}", report);
        }
        _ => println!("No candidates were visited."),
    }

    Ok(())
}
