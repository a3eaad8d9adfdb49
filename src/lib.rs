//! Immo-Harvest: a concurrent real-estate listing harvester
//!
//! This crate discovers listing URLs across the partitions of a paginated
//! property catalog, then fetches and extracts every listing with bounded
//! concurrency, persisting each batch as soon as it completes.

pub mod catalog;
pub mod clean;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod harvest;
pub mod output;

use thiserror::Error;

/// Main error type for Immo-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for Immo-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{PageHandle, Partition, SeedQuery};
pub use config::Config;
pub use crawler::{dedupe, UniqueUrlSet};
pub use extract::{ExtractionOutcome, ImmovlanExtractor, Record, RecordExtractor};
pub use harvest::{BatchPipeline, ProgressSnapshot, ProgressState};
pub use output::{CsvSink, RecordSink};
