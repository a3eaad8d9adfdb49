//! Result page crawler

use crate::catalog::{ExclusionFilter, PageHandle};
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::parser::extract_listing_links;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fetches one result page and returns the listing links found on it
///
/// A page that cannot be fetched contributes no links. The failure is logged
/// and never blocks sibling pages.
pub async fn crawl_page(
    client: &Client,
    page: &PageHandle,
    timeout: Duration,
    filter: &ExclusionFilter,
) -> Vec<String> {
    let body = match fetch_url(client, &page.url, timeout).await {
        FetchResult::Success { body } => body,
        failure => {
            tracing::warn!(
                "Skipping page {} of {} ({}): {}",
                page.index,
                page.seed.partition(),
                page.url,
                failure
            );
            return Vec::new();
        }
    };

    let base_url = match Url::parse(&page.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Unparseable page URL {}: {}", page.url, e);
            return Vec::new();
        }
    };

    let links = extract_listing_links(&body, &base_url, filter);
    tracing::debug!(
        "Page {} of {} yielded {} links",
        page.index,
        page.seed.partition(),
        links.len()
    );
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{page_handles, seed_queries};
    use crate::config::{CatalogConfig, HttpConfig};
    use crate::crawler::build_http_client;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn handles_for(server: &MockServer, bound: u32) -> Vec<PageHandle> {
        let catalog = CatalogConfig {
            base_url: format!("{}/en/real-estate", server.uri()),
            provinces: vec!["namur".to_string()],
            towns: vec![],
            ..CatalogConfig::default()
        };
        let seed = seed_queries(&catalog).remove(0);
        page_handles(&seed, bound)
    }

    #[tokio::test]
    async fn test_crawl_page_extracts_links() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body>
                <h2><a href="/en/detail/villa/for-sale/5000/namur/a1">A1</a></h2>
                <h2><a href="/en/projectdetail/99-100">Project</a></h2>
                <h2><a href="/en/detail/loft/for-sale/5000/namur/a2">A2</a></h2>
                </body></html>"#,
            ))
            .mount(&server)
            .await;

        let client = build_http_client(&HttpConfig::default()).unwrap();
        let filter = ExclusionFilter::new(vec!["/projectdetail/".to_string()]);
        let page = &handles_for(&server, 1)[0];

        let links = crawl_page(&client, page, Duration::from_secs(5), &filter).await;

        assert_eq!(
            links,
            vec![
                format!("{}/en/detail/villa/for-sale/5000/namur/a1", server.uri()),
                format!("{}/en/detail/loft/for-sale/5000/namur/a2", server.uri()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_page_yields_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_http_client(&HttpConfig::default()).unwrap();
        let page = &handles_for(&server, 1)[0];

        let links = crawl_page(&client, page, Duration::from_secs(5), &ExclusionFilter::default()).await;
        assert!(links.is_empty());
    }
}
