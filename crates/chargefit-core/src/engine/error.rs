use thiserror::Error;

use super::config::ConfigError;
use crate::core::domain::range::{DomainConfigError, DomainKind};
use crate::core::io::catalog::CatalogError;
use crate::core::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to load residue catalog: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Invalid charge domain: {source}")]
    Domain {
        #[from]
        source: DomainConfigError,
    },

    #[error("Scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("The {kind} domain product does not fit in 64 bits")]
    SearchSpaceTooLarge { kind: DomainKind },

    #[error("Start index {start} lies beyond the {len} candidates of the search space")]
    StartOutOfRange { start: u64, len: u64 },

    #[error("Failed to write solution record: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },
}
