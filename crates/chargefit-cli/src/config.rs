use crate::cli::{CatalogArgs, CheckArgs, EvolveArgs, ExhaustiveArgs};
use crate::error::{CliError, Result};
use chargefit::core::io::catalog::TemplateSelection;
use chargefit::engine::config::{self as core_config, default_seeds};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const DEFAULT_OUTPUT: &str = "solutions.txt";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCatalogConfig {
    templates_dir: Option<PathBuf>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDomainConfig {
    path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialExhaustiveConfig {
    threshold: Option<u64>,
    stop_at_zero: Option<bool>,
    start_index: Option<u64>,
    block_size: Option<u64>,
    output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialEvolutionConfig {
    population_size: Option<usize>,
    elite_count: Option<usize>,
    offspring_per_pair: Option<usize>,
    self_mutation_rate: Option<usize>,
    cross_mutation_rate: Option<usize>,
    generation_budget: Option<u64>,
    rng_seed: Option<u64>,
    random_start: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialChargefitConfig {
    catalog: Option<PartialCatalogConfig>,
    domain: Option<PartialDomainConfig>,
    exhaustive: Option<PartialExhaustiveConfig>,
    evolution: Option<PartialEvolutionConfig>,
}

/// A fully merged exhaustive run: the core config plus where the hits go.
#[derive(Debug)]
pub struct ExhaustiveRun {
    pub config: core_config::ExhaustiveConfig,
    pub output: PathBuf,
}

/// Templates directory, selection and domain file after merging.
struct Resources {
    templates_dir: PathBuf,
    selection: TemplateSelection,
    domain_path: Option<PathBuf>,
}

impl PartialChargefitConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// The file named by `--config`, or an empty configuration when there is none.
    pub fn load(args: &CatalogArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_exhaustive(mut self, args: &ExhaustiveArgs) -> Result<ExhaustiveRun> {
        self.apply_set_values(&args.catalog.set_values)?;
        let resources = self.merge_resources(&args.catalog)?;
        let file = self.exhaustive.take().unwrap_or_default();

        let mut builder = core_config::ExhaustiveConfigBuilder::new()
            .templates_dir(resources.templates_dir)
            .selection(resources.selection)
            .domain_path(resources.domain_path)
            .stop_at_zero(args.stop_at_zero || file.stop_at_zero.unwrap_or(false));
        if let Some(threshold) = args.threshold.or(file.threshold) {
            builder = builder.threshold(threshold);
        }
        if let Some(start) = args.start_index.or(file.start_index) {
            builder = builder.start_index(start);
        }
        if let Some(size) = args.block_size.or(file.block_size) {
            builder = builder.block_size(size);
        }

        let output = args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        Ok(ExhaustiveRun {
            config: builder.build().map_err(|e| CliError::Config(e.to_string()))?,
            output,
        })
    }

    pub fn merge_evolution(mut self, args: &EvolveArgs) -> Result<core_config::EvolutionConfig> {
        self.apply_set_values(&args.catalog.set_values)?;
        let resources = self.merge_resources(&args.catalog)?;
        let file = self.evolution.take().unwrap_or_default();

        let mut builder = core_config::EvolutionConfigBuilder::new()
            .templates_dir(resources.templates_dir)
            .selection(resources.selection)
            .domain_path(resources.domain_path)
            .rng_seed(args.rng_seed.or(file.rng_seed));
        if let Some(size) = args.population_size.or(file.population_size) {
            builder = builder.population_size(size);
        }
        if let Some(count) = args.elite_count.or(file.elite_count) {
            builder = builder.elite_count(count);
        }
        if let Some(count) = args.offspring_per_pair.or(file.offspring_per_pair) {
            builder = builder.offspring_per_pair(count);
        }
        if let Some(rate) = args.self_mutation_rate.or(file.self_mutation_rate) {
            builder = builder.self_mutation_rate(rate);
        }
        if let Some(rate) = args.cross_mutation_rate.or(file.cross_mutation_rate) {
            builder = builder.cross_mutation_rate(rate);
        }
        if let Some(budget) = args.generation_budget.or(file.generation_budget) {
            builder = builder.generation_budget(budget);
        }
        if !(args.random_start || file.random_start.unwrap_or(false)) {
            builder = builder.seeds(default_seeds());
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_check(mut self, args: &CheckArgs) -> Result<core_config::CheckConfig> {
        self.apply_set_values(&args.catalog.set_values)?;
        let resources = self.merge_resources(&args.catalog)?;
        core_config::CheckConfigBuilder::new()
            .templates_dir(resources.templates_dir)
            .selection(resources.selection)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn merge_resources(&mut self, args: &CatalogArgs) -> Result<Resources> {
        let catalog = self.catalog.take().unwrap_or_default();
        let domain = self.domain.take().unwrap_or_default();

        let templates_dir = args
            .templates_dir
            .clone()
            .or(catalog.templates_dir)
            .ok_or_else(|| {
                CliError::Config(
                    "A value for 'catalog.templates-dir' is required either in the config file or via --templates-dir."
                        .to_string(),
                )
            })?;

        let pick = |cli: &[String], file: Option<Vec<String>>| {
            if cli.is_empty() {
                file.unwrap_or_default()
            } else {
                cli.to_vec()
            }
        };
        let include = pick(&args.include, catalog.include);
        let exclude = pick(&args.exclude, catalog.exclude);
        let selection = if include.is_empty() && exclude.is_empty() {
            TemplateSelection::All
        } else {
            TemplateSelection::List { include, exclude }
        };

        Ok(Resources {
            templates_dir,
            selection,
            domain_path: args.domain.clone().or(domain.path),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "exhaustive.threshold" => {
                    self.exhaustive
                        .get_or_insert_with(Default::default)
                        .threshold = Some(parse_integer(key, value_str)?);
                }
                "exhaustive.block-size" => {
                    self.exhaustive
                        .get_or_insert_with(Default::default)
                        .block_size = Some(parse_integer(key, value_str)?);
                }
                "evolution.generation-budget" => {
                    self.evolution
                        .get_or_insert_with(Default::default)
                        .generation_budget = Some(parse_integer(key, value_str)?);
                }
                "evolution.elite-count" => {
                    self.evolution
                        .get_or_insert_with(Default::default)
                        .elite_count = Some(parse_integer(key, value_str)?);
                }
                "evolution.self-mutation-rate" => {
                    self.evolution
                        .get_or_insert_with(Default::default)
                        .self_mutation_rate = Some(parse_integer(key, value_str)?);
                }
                "evolution.cross-mutation-rate" => {
                    self.evolution
                        .get_or_insert_with(Default::default)
                        .cross_mutation_rate = Some(parse_integer(key, value_str)?);
                }
                "evolution.rng-seed" => {
                    self.evolution
                        .get_or_insert_with(Default::default)
                        .rng_seed = Some(parse_integer(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_integer<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid integer value for {}: {}", key, value))
    })
}
