//! Pagination scout
//!
//! Determines how many result pages a partition spans before the page crawl
//! starts. Any failure degrades to a single page for that partition rather
//! than aborting it.

use crate::catalog::SeedQuery;
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::parser::max_page_index;
use reqwest::Client;
use std::time::Duration;

/// Default number of pages crawled past the highest advertised index
///
/// Listings published between the scout and the crawl push older ones onto
/// later pages; the margin keeps them in reach.
pub const DEFAULT_PAGE_MARGIN: u32 = 10;

/// Returns the number of pages to crawl for a partition (always >= 1)
///
/// | Condition | Bound |
/// |-----------|-------|
/// | First page fetch fails | 1 |
/// | No pagination control | 1 |
/// | Control without a parseable `data-page` | 1 |
/// | Highest advertised index `n` | `n + margin` |
pub async fn bound_pages(client: &Client, seed: &SeedQuery, timeout: Duration, margin: u32) -> u32 {
    let body = match fetch_url(client, seed.url(), timeout).await {
        FetchResult::Success { body } => body,
        failure => {
            tracing::warn!(
                "Pagination scout failed for {} ({}), assuming a single page",
                seed.partition(),
                failure
            );
            return 1;
        }
    };

    let bound = page_bound_from_html(&body, margin);
    tracing::debug!("Partition {} spans {} pages", seed.partition(), bound);
    bound
}

/// Pure part of the scout: the bound implied by a first-page document
pub fn page_bound_from_html(html: &str, margin: u32) -> u32 {
    match max_page_index(html) {
        Some(highest) => highest.saturating_add(margin),
        None => 1,
    }
}
