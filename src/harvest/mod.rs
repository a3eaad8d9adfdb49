//! Detail extraction stage
//!
//! This module turns a unique URL set into persisted records:
//! - Partitioning URLs into fixed-size batches
//! - Bounded-concurrency fetch and extraction per batch
//! - Persisting each batch before the next starts
//! - Progress, throughput and ETA reporting

mod batch;
mod pipeline;
mod progress;

pub use batch::{partition, ExtractionBatch};
pub use pipeline::{extract_url, BatchPipeline, PipelineOptions};
pub use progress::{ProgressSnapshot, ProgressState};

use crate::config::Config;
use crate::crawler::{build_http_client, UniqueUrlSet};
use crate::extract::ImmovlanExtractor;
use crate::output::CsvSink;
use crate::HarvestError;
use std::sync::Arc;

/// Harvests `urls` into the configured records file
///
/// # Example
///
/// ```no_run
/// use immo_harvest::config::Config;
/// use immo_harvest::dedupe;
/// use immo_harvest::harvest::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = dedupe(vec!["https://immovlan.be/en/detail/villa/for-sale/5000/namur/vbd1".to_string()]);
/// let submitted = run_harvest(&Config::default(), &urls).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: &Config, urls: &UniqueUrlSet) -> Result<usize, HarvestError> {
    let client = build_http_client(&config.http)?;
    let sink = CsvSink::new(&config.output.records_path);
    let mut pipeline = BatchPipeline::new(
        client,
        Arc::new(ImmovlanExtractor::new()),
        sink,
        PipelineOptions::from_config(config),
    );
    pipeline.run(urls).await
}
