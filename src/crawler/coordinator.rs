//! Discovery coordinator - URL discovery orchestration
//!
//! This module drives the discovery half of a harvest:
//! - Scouting every partition's pagination bound
//! - Crawling every resulting page on the crawl-stage worker pool
//! - Merging the candidate links into one unique URL set

use crate::catalog::{page_handles, seed_queries, ExclusionFilter, SeedQuery};
use crate::config::Config;
use crate::crawler::dedup::{dedupe, UniqueUrlSet};
use crate::crawler::page::crawl_page;
use crate::crawler::pool::WorkerPool;
use crate::crawler::scout::bound_pages;
use crate::crawler::build_http_client;
use crate::HarvestError;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Discovery stage coordinator
pub struct Coordinator {
    client: Client,
    pool: WorkerPool,
    seeds: Vec<Arc<SeedQuery>>,
    filter: Arc<ExclusionFilter>,
    timeout: Duration,
    page_margin: u32,
}

impl Coordinator {
    /// Creates a coordinator for the configured partitions
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `client` - HTTP client shared by all crawl workers
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            pool: WorkerPool::new(config.harvester.crawl_concurrency),
            seeds: seed_queries(&config.catalog),
            filter: Arc::new(ExclusionFilter::new(config.catalog.exclude_patterns.clone())),
            timeout: Duration::from_secs(config.http.request_timeout_secs),
            page_margin: config.harvester.page_margin,
        }
    }

    pub fn seeds(&self) -> &[Arc<SeedQuery>] {
        &self.seeds
    }

    /// Runs discovery over every partition
    ///
    /// 1. Scouts each partition's page bound
    /// 2. Crawls pages `1..=bound` of every partition
    /// 3. Deduplicates the links, in partition then page order
    ///
    /// Individual failures only shrink the result; discovery itself never fails.
    pub async fn run(&self) -> UniqueUrlSet {
        let start_time = Instant::now();
        tracing::info!(
            "Scouting {} partitions with {} workers",
            self.seeds.len(),
            self.pool.size()
        );

        let mut bounds = self
            .pool
            .run_all(
                self.seeds.iter().cloned().enumerate(),
                |(_, seed)| seed.url().to_string(),
                |(ordinal, seed)| {
                    let client = self.client.clone();
                    let timeout = self.timeout;
                    let margin = self.page_margin;
                    async move {
                        let bound = bound_pages(&client, &seed, timeout, margin).await;
                        (ordinal, seed, bound)
                    }
                },
            )
            .await;
        bounds.sort_by_key(|(ordinal, _, _)| *ordinal);

        let pages: Vec<_> = bounds
            .iter()
            .flat_map(|(_, seed, bound)| page_handles(seed, *bound))
            .collect();
        tracing::info!("Crawling {} result pages", pages.len());

        let mut crawled = self
            .pool
            .run_all(
                pages.into_iter().enumerate(),
                |(_, page)| page.url.clone(),
                |(ordinal, page)| {
                    let client = self.client.clone();
                    let filter = Arc::clone(&self.filter);
                    let timeout = self.timeout;
                    async move {
                        let links = crawl_page(&client, &page, timeout, &filter).await;
                        (ordinal, links)
                    }
                },
            )
            .await;
        crawled.sort_by_key(|(ordinal, _)| *ordinal);

        let candidates: usize = crawled.iter().map(|(_, links)| links.len()).sum();
        let urls = dedupe(crawled.into_iter().flat_map(|(_, links)| links));

        tracing::info!(
            "Discovery completed: {} candidate links, {} unique URLs in {:.1}s",
            candidates,
            urls.len(),
            start_time.elapsed().as_secs_f64()
        );

        urls
    }
}

/// Runs the discovery stage with a freshly built HTTP client
///
/// # Example
///
/// ```no_run
/// use immo_harvest::config::Config;
/// use immo_harvest::crawler::run_discovery;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = run_discovery(&Config::default()).await?;
/// println!("{} listings discovered", urls.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_discovery(config: &Config) -> Result<UniqueUrlSet, HarvestError> {
    let client = build_http_client(&config.http)?;
    let coordinator = Coordinator::new(config, client);
    Ok(coordinator.run().await)
}
