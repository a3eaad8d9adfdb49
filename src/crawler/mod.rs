//! Crawler module for listing discovery
//!
//! This module contains the discovery logic, including:
//! - HTTP fetching with failures classified as data
//! - Pagination scouting per search partition
//! - Result page crawling and link extraction
//! - Candidate URL deduplication
//! - The bounded worker pool shared with the extraction stage

mod coordinator;
mod dedup;
mod fetcher;
mod page;
mod parser;
mod pool;
mod scout;

pub use coordinator::{run_discovery, Coordinator};
pub use dedup::{dedupe, UniqueUrlSet};
pub use fetcher::{build_http_client, fetch_url, FetchResult, NetworkFailure};
pub use page::crawl_page;
pub use parser::{extract_listing_links, max_page_index};
pub use pool::WorkerPool;
pub use scout::{bound_pages, page_bound_from_html, DEFAULT_PAGE_MARGIN};
