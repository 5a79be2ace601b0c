use crate::core::io::catalog::TemplateSelection;
use crate::core::models::assignment::Assignment;
use crate::core::scoring::Score;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn positive<T: PartialEq + Default>(name: &'static str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(invalid(name, "must be greater than zero"));
    }
    Ok(value)
}

/// Where the residue templates and the charge domain come from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceConfig {
    pub templates_dir: PathBuf,
    pub selection: TemplateSelection,
    /// TOML domain file; the compiled-in AMBER domain when `None`.
    pub domain_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExhaustiveParams {
    pub threshold: Score,
    pub stop_at_zero: bool,
    pub start_index: u64,
    pub block_size: u64,
}

impl ExhaustiveParams {
    pub const DEFAULT_THRESHOLD: Score = 7;
    pub const DEFAULT_BLOCK_SIZE: u64 = 1 << 20;
}

impl Default for ExhaustiveParams {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            stop_at_zero: false,
            start_index: 0,
            block_size: Self::DEFAULT_BLOCK_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionParams {
    pub population_size: usize,
    pub elite_count: usize,
    pub offspring_per_pair: usize,
    pub self_mutation_rate: usize,
    pub cross_mutation_rate: usize,
    pub generation_budget: u64,
    pub rng_seed: Option<u64>,
    /// Initial population; a random base vector bred to `population_size` when `None`.
    pub seeds: Option<Vec<Assignment>>,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 24,
            elite_count: 4,
            offspring_per_pair: 2,
            self_mutation_rate: 3,
            cross_mutation_rate: 6,
            generation_budget: 10_000_000,
            rng_seed: None,
            seeds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExhaustiveConfig {
    pub resources: ResourceConfig,
    pub search: ExhaustiveParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub resources: ResourceConfig,
    pub search: EvolutionParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub resources: ResourceConfig,
}

#[derive(Default)]
struct ResourceFields {
    templates_dir: Option<PathBuf>,
    selection: Option<TemplateSelection>,
    domain_path: Option<PathBuf>,
}

impl ResourceFields {
    fn build(self) -> Result<ResourceConfig, ConfigError> {
        Ok(ResourceConfig {
            templates_dir: self
                .templates_dir
                .ok_or(ConfigError::MissingParameter("templates_dir"))?,
            selection: self.selection.unwrap_or_default(),
            domain_path: self.domain_path,
        })
    }
}

#[derive(Default)]
pub struct ExhaustiveConfigBuilder {
    resources: ResourceFields,
    threshold: Option<Score>,
    stop_at_zero: Option<bool>,
    start_index: Option<u64>,
    block_size: Option<u64>,
}

impl ExhaustiveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates_dir(mut self, path: PathBuf) -> Self {
        self.resources.templates_dir = Some(path);
        self
    }
    pub fn selection(mut self, selection: TemplateSelection) -> Self {
        self.resources.selection = Some(selection);
        self
    }
    pub fn domain_path(mut self, path: Option<PathBuf>) -> Self {
        self.resources.domain_path = path;
        self
    }
    pub fn threshold(mut self, threshold: Score) -> Self {
        self.threshold = Some(threshold);
        self
    }
    pub fn stop_at_zero(mut self, stop: bool) -> Self {
        self.stop_at_zero = Some(stop);
        self
    }
    pub fn start_index(mut self, index: u64) -> Self {
        self.start_index = Some(index);
        self
    }
    pub fn block_size(mut self, size: u64) -> Self {
        self.block_size = Some(size);
        self
    }

    pub fn build(self) -> Result<ExhaustiveConfig, ConfigError> {
        let defaults = ExhaustiveParams::default();
        let search = ExhaustiveParams {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            stop_at_zero: self.stop_at_zero.unwrap_or(defaults.stop_at_zero),
            start_index: self.start_index.unwrap_or(defaults.start_index),
            block_size: positive("block_size", self.block_size.unwrap_or(defaults.block_size))?,
        };
        Ok(ExhaustiveConfig {
            resources: self.resources.build()?,
            search,
        })
    }
}

#[derive(Default)]
pub struct EvolutionConfigBuilder {
    resources: ResourceFields,
    population_size: Option<usize>,
    elite_count: Option<usize>,
    offspring_per_pair: Option<usize>,
    self_mutation_rate: Option<usize>,
    cross_mutation_rate: Option<usize>,
    generation_budget: Option<u64>,
    rng_seed: Option<u64>,
    seeds: Option<Vec<Assignment>>,
}

impl EvolutionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates_dir(mut self, path: PathBuf) -> Self {
        self.resources.templates_dir = Some(path);
        self
    }
    pub fn selection(mut self, selection: TemplateSelection) -> Self {
        self.resources.selection = Some(selection);
        self
    }
    pub fn domain_path(mut self, path: Option<PathBuf>) -> Self {
        self.resources.domain_path = path;
        self
    }
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }
    pub fn elite_count(mut self, count: usize) -> Self {
        self.elite_count = Some(count);
        self
    }
    pub fn offspring_per_pair(mut self, count: usize) -> Self {
        self.offspring_per_pair = Some(count);
        self
    }
    pub fn self_mutation_rate(mut self, rate: usize) -> Self {
        self.self_mutation_rate = Some(rate);
        self
    }
    pub fn cross_mutation_rate(mut self, rate: usize) -> Self {
        self.cross_mutation_rate = Some(rate);
        self
    }
    pub fn generation_budget(mut self, budget: u64) -> Self {
        self.generation_budget = Some(budget);
        self
    }
    pub fn rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }
    pub fn seeds(mut self, seeds: Vec<Assignment>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    pub fn build(self) -> Result<EvolutionConfig, ConfigError> {
        let defaults = EvolutionParams::default();
        if let Some(seeds) = &self.seeds {
            let Some(first) = seeds.first() else {
                return Err(invalid("seeds", "at least one seed is required"));
            };
            if seeds.iter().any(|s| s.len() != first.len()) {
                return Err(invalid("seeds", "all seeds must have the same length"));
            }
        }
        let search = EvolutionParams {
            population_size: positive(
                "population_size",
                self.population_size.unwrap_or(defaults.population_size),
            )?,
            elite_count: positive(
                "elite_count",
                self.elite_count.unwrap_or(defaults.elite_count),
            )?,
            offspring_per_pair: positive(
                "offspring_per_pair",
                self.offspring_per_pair
                    .unwrap_or(defaults.offspring_per_pair),
            )?,
            self_mutation_rate: self
                .self_mutation_rate
                .unwrap_or(defaults.self_mutation_rate),
            cross_mutation_rate: self
                .cross_mutation_rate
                .unwrap_or(defaults.cross_mutation_rate),
            generation_budget: self
                .generation_budget
                .unwrap_or(defaults.generation_budget),
            rng_seed: self.rng_seed,
            seeds: self.seeds,
        };
        Ok(EvolutionConfig {
            resources: self.resources.build()?,
            search,
        })
    }
}

#[derive(Default)]
pub struct CheckConfigBuilder {
    resources: ResourceFields,
}

impl CheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates_dir(mut self, path: PathBuf) -> Self {
        self.resources.templates_dir = Some(path);
        self
    }
    pub fn selection(mut self, selection: TemplateSelection) -> Self {
        self.resources.selection = Some(selection);
        self
    }

    pub fn build(self) -> Result<CheckConfig, ConfigError> {
        Ok(CheckConfig {
            resources: self.resources.build()?,
        })
    }
}

/// The four hand-tuned starting vectors for the AMBER vocabulary.
///
/// Some positions lie outside the wide domain (HO is 0, NB is -2). Mutation only ever
/// draws admissible values.
#[rustfmt::skip]
pub fn default_seeds() -> Vec<Assignment> {
    //                    C  C* CA  CB CC  CD  CK  CN CR CT  CV  CW  H H1 H2 H3 H4 H5 HA HC HO HP HS   N N2 N3  NA  NB   O  O2  OH  S  SH
    [
        [ 1, 4, 0,  0, 4, -2, -4, -2, 0, 0, -2, -2, 1, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, -1, 0, 1, -1, -2, -1, -1, -1, 0, -1],
        [ 1, 2, 0,  0, 4, -2,  0,  0, 0, 0, -2, -2, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, -1, 0, 1, -1, -2, -1, -1, -1, 0, -1],
        [ 1, 2, 0,  0, 4,  4, -4,  0, 0, 0, -2, -2, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, -1, 0, 1, -1, -2, -1, -1, -1, 0, -1],
        [ 1, 2, 0, -4, 4, -3,  3,  4, 0, 0, -2, -2, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, -1, 0, 1, -1, -2, -1, -1, -1, 0, -1],
    ]
    .into_iter()
    .map(|values| Assignment::new(values.to_vec()))
    .collect()
}
