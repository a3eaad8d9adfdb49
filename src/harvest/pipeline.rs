//! Batch extraction pipeline
//!
//! The pipeline is the sole owner of extraction workers and the only writer
//! to the record sink. Each batch goes through fetch, extract, persist and
//! report before the next one starts, so an interrupted run loses at most the
//! batch in flight.

use crate::config::Config;
use crate::crawler::{fetch_url, FetchResult, UniqueUrlSet, WorkerPool};
use crate::extract::{ExtractionOutcome, Record, RecordExtractor};
use crate::harvest::batch::{partition, ExtractionBatch};
use crate::harvest::progress::ProgressState;
use crate::output::RecordSink;
use crate::HarvestError;
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Batching and concurrency settings of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// URLs per persisted batch
    pub batch_size: usize,
    /// Detail fetches in flight at most
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            concurrency: 20,
            timeout: Duration::from_secs(10),
        }
    }
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.harvester.batch_size,
            concurrency: config.harvester.extract_concurrency,
            timeout: Duration::from_secs(config.http.request_timeout_secs),
        }
    }
}

/// Fetches and extracts listings batch by batch into a record sink
pub struct BatchPipeline<S> {
    client: Client,
    pool: WorkerPool,
    extractor: Arc<dyn RecordExtractor>,
    sink: S,
    options: PipelineOptions,
}

impl<S: RecordSink> BatchPipeline<S> {
    /// Creates a pipeline with one worker pool reused by every batch
    pub fn new(
        client: Client,
        extractor: Arc<dyn RecordExtractor>,
        sink: S,
        options: PipelineOptions,
    ) -> Self {
        Self {
            client,
            pool: WorkerPool::new(options.concurrency),
            extractor,
            sink,
            options,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Harvests every URL of the set
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of URLs submitted. Skipped URLs are counted too;
    ///   the accepted/skipped split is reported through the progress log.
    /// * `Err(HarvestError)` - The sink failed to persist a batch. Batches
    ///   persisted before the failure stay on disk.
    pub async fn run(&mut self, urls: &UniqueUrlSet) -> Result<usize, HarvestError> {
        let started = Instant::now();
        tracing::info!(
            "Start harvesting {} URLs in batches of {} with {} workers",
            urls.len(),
            self.options.batch_size,
            self.pool.size()
        );

        let mut progress = ProgressState::new(urls.len(), started);
        for batch in partition(urls.as_slice(), self.options.batch_size) {
            progress = self.run_batch(batch, progress).await?;
        }

        let summary = progress.snapshot(Instant::now());
        tracing::info!(
            "Harvest completed: {} URLs submitted, {} records accepted, {} skipped in {:.1} min",
            summary.processed,
            summary.accepted,
            summary.skipped(),
            summary.elapsed.as_secs_f64() / 60.0
        );

        Ok(progress.processed())
    }

    /// Runs one batch to completion and returns the advanced progress
    async fn run_batch(
        &mut self,
        batch: ExtractionBatch<'_>,
        progress: ProgressState,
    ) -> Result<ProgressState, HarvestError> {
        tracing::info!("Batch {}: {} URLs", batch.index, batch.len());

        let outcomes = self
            .pool
            .run_all(batch.urls.iter().cloned(), String::clone, |url| {
                let client = self.client.clone();
                let extractor = Arc::clone(&self.extractor);
                let timeout = self.options.timeout;
                async move { extract_url(&client, extractor.as_ref(), &url, timeout).await }
            })
            .await;

        let records: Vec<Record> = outcomes
            .into_iter()
            .filter_map(ExtractionOutcome::into_record)
            .collect();

        if let Err(e) = self.sink.append(&records) {
            tracing::error!("Failed to persist batch {}: {}", batch.index, e);
            return Err(e.into());
        }

        let progress = progress.advance(batch.len(), records.len());
        let snapshot = progress.snapshot(Instant::now());
        match estimated_finish(snapshot.eta) {
            Some(finish) => tracing::info!("{} (finish around {})", snapshot, finish),
            None => tracing::info!("{}", snapshot),
        }

        Ok(progress)
    }
}

/// Fetches one detail page and runs the extractor on it
///
/// Fetch failures and excluded listings both come back as `Skip`.
pub async fn extract_url(
    client: &Client,
    extractor: &dyn RecordExtractor,
    url: &str,
    timeout: Duration,
) -> ExtractionOutcome {
    match fetch_url(client, url, timeout).await {
        FetchResult::Success { body } => extract_document(extractor, url, &body),
        failure => {
            tracing::warn!("[SKIP] {}: {}", url, failure);
            ExtractionOutcome::Skip
        }
    }
}

fn extract_document(extractor: &dyn RecordExtractor, url: &str, body: &str) -> ExtractionOutcome {
    let document = Html::parse_document(body);
    extractor.extract(url, &document).into()
}

/// Wall-clock time the run should finish at, if the ETA is known
fn estimated_finish(eta: Option<Duration>) -> Option<String> {
    let eta = chrono::Duration::from_std(eta?).ok()?;
    let finish = chrono::Local::now().checked_add_signed(eta)?;
    Some(finish.format("%H:%M:%S").to_string())
}
