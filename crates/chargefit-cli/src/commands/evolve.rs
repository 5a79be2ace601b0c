use super::spawn_interrupt_listener;
use crate::cli::EvolveArgs;
use crate::config::PartialChargefitConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use chargefit::{
    core::report::{AssignmentTable, PopulationDump},
    engine::{progress::ProgressReporter, tasks::evolution::Termination},
    workflows,
};
use tracing::info;

pub async fn run(args: EvolveArgs) -> Result<()> {
    let partial_config = PartialChargefitConfig::load(&args.catalog)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_evolution(&args)?;

    let progress_handler = CliProgressHandler::new().printing_improvements();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let cancel = spawn_interrupt_listener();

    println!("Starting evolutionary search...");
    let result =
        tokio::task::block_in_place(|| workflows::evolve::run(&config, &reporter, &cancel))?;
    progress_handler.clear();

    let outcome = &result.outcome;
    let reason = match outcome.termination {
        Termination::Solved => "every residue matches",
        Termination::BudgetExhausted => "generation budget exhausted",
        Termination::Cancelled => "interrupted",
    };
    println!(
        "Stopped after {} generation(s): {}.",
        outcome.generations, reason
    );

    print!(
        "{}",
        PopulationDump::new(&outcome.population, config.search.elite_count)
    );
    print!(
        "{}",
        AssignmentTable::new(result.catalog.vocabulary(), &outcome.best.assignment)
    );
    print!("{}", result.discrepancies);

    Ok(())
}
