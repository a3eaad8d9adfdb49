//! HTML parser for catalog result pages
//!
//! This module handles parsing search result pages to extract:
//! - The highest page index advertised by the pagination control
//! - Listing links found in result titles

use crate::catalog::ExclusionFilter;
use scraper::{Html, Selector};
use url::Url;

/// Container of the pagination links
const PAGINATION_SELECTOR: &str = "ul.pagination";

/// Elements inside the pagination control that advertise a page index
const PAGE_INDEX_SELECTOR: &str = "[data-page]";

/// Listing-title anchors on a result page
const LISTING_LINK_SELECTOR: &str = "h2 a[href]";

/// Reads the highest page index advertised by the pagination control
///
/// Returns `None` when the control is absent, or when none of its
/// `data-page` attributes parses as a positive integer.
///
/// # Example
///
/// ```
/// use immo_harvest::crawler::max_page_index;
///
/// let html = r#"<ul class="pagination">
///     <li><a data-page="1">1</a></li>
///     <li><a data-page="7">7</a></li>
/// </ul>"#;
/// assert_eq!(max_page_index(html), Some(7));
/// ```
pub fn max_page_index(html: &str) -> Option<u32> {
    let document = Html::parse_document(html);

    let pagination_selector = Selector::parse(PAGINATION_SELECTOR).ok()?;
    let index_selector = Selector::parse(PAGE_INDEX_SELECTOR).ok()?;

    let pagination = document.select(&pagination_selector).next()?;

    pagination
        .select(&index_selector)
        .filter_map(|element| element.value().attr("data-page"))
        .filter_map(|value| value.trim().parse::<u32>().ok())
        .filter(|index| *index >= 1)
        .max()
}

/// Extracts listing links from a result page
///
/// # Link Extraction Rules
///
/// - Only anchors inside `<h2>` listing titles are considered
/// - Absolute hrefs are kept byte-for-byte
/// - Relative hrefs are resolved against the page URL
/// - `javascript:`, `mailto:`, `tel:`, data URIs and fragment-only links are skipped
/// - Links matching the exclusion filter are dropped
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, for resolving relative links
/// * `filter` - Aggregate-listing exclusion filter
pub fn extract_listing_links(html: &str, base_url: &Url, filter: &ExclusionFilter) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse(LISTING_LINK_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .filter(|link| {
            let excluded = filter.is_excluded(link);
            if excluded {
                tracing::debug!("Excluding aggregate listing {}", link);
            }
            !excluded
        })
        .collect()
}

/// Resolves a link href into a fetchable URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only and empty links
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Absolute links are the dedup identity, so they must not be rewritten
    if let Ok(absolute) = Url::parse(href) {
        return is_http(&absolute).then(|| href.to_string());
    }

    match base_url.join(href) {
        Ok(absolute) if is_http(&absolute) => Some(absolute.to_string()),
        _ => None,
    }
}

fn is_http(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}
