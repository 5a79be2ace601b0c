use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "chargefit - search and validation of per-atom-type integer charge increments for AMBER residue templates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate every assignment of the tight domain and record those under the threshold.
    Exhaustive(ExhaustiveArgs),
    /// Run the elitist genetic search over the wide domain.
    Evolve(EvolveArgs),
    /// Check the templates against the fixed reference increments.
    Check(CheckArgs),
}

/// Options shared by every subcommand: where templates and domain come from.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the `<NAME>.xat.txt` residue templates.
    #[arg(short, long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Only load these residues (comma separated).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Skip these residues (comma separated).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Load the tight and wide domains from a TOML file instead of the built-in tables.
    #[arg(short, long, value_name = "PATH")]
    pub domain: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S exhaustive.threshold=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `exhaustive` subcommand.
#[derive(Args, Debug)]
pub struct ExhaustiveArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Record every candidate scoring below this value.
    #[arg(long, value_name = "INT")]
    pub threshold: Option<u64>,

    /// Stop at the first candidate with score 0.
    #[arg(long)]
    pub stop_at_zero: bool,

    /// Resume the enumeration from this candidate index.
    #[arg(long, value_name = "INDEX")]
    pub start_index: Option<u64>,

    /// Number of candidates scanned between cancellation checks.
    #[arg(long, value_name = "INT")]
    pub block_size: Option<u64>,

    /// File the qualifying candidates are appended to.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `evolve` subcommand.
#[derive(Args, Debug)]
pub struct EvolveArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Size of the initial population when starting from a random vector.
    #[arg(long, value_name = "INT")]
    pub population_size: Option<usize>,

    /// Number of top-ranked assignments kept as parents each generation.
    #[arg(short, long, value_name = "INT")]
    pub elite_count: Option<usize>,

    /// Children produced by every pair of elites.
    #[arg(long, value_name = "INT")]
    pub offspring_per_pair: Option<usize>,

    /// Point mutations applied to children of an elite paired with itself.
    #[arg(long, value_name = "INT")]
    pub self_mutation_rate: Option<usize>,

    /// Point mutations applied to children of two distinct elites.
    #[arg(long, value_name = "INT")]
    pub cross_mutation_rate: Option<usize>,

    /// Maximum number of generations.
    #[arg(short, long, value_name = "INT")]
    pub generation_budget: Option<u64>,

    /// Seed the random number generator for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub rng_seed: Option<u64>,

    /// Start from a random vector instead of the built-in seed assignments.
    #[arg(long)]
    pub random_start: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}
