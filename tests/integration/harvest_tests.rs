//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small catalog and its detail pages,
//! and run discovery and extraction end-to-end against it.

use immo_harvest::config::{CatalogConfig, Config};
use immo_harvest::crawler::{build_http_client, run_discovery};
use immo_harvest::harvest::{run_harvest, BatchPipeline, PipelineOptions};
use immo_harvest::output::{harvested_urls, load_urls, save_urls, OutputResult};
use immo_harvest::{dedupe, CsvSink, ImmovlanExtractor, Record, RecordSink};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sink that keeps records in memory and counts append calls
#[derive(Default)]
struct CountingSink {
    records: Vec<Record>,
    appends: usize,
}

impl RecordSink for CountingSink {
    fn append(&mut self, records: &[Record]) -> OutputResult<()> {
        self.records.extend_from_slice(records);
        self.appends += 1;
        Ok(())
    }
}

fn detail_url(server: &MockServer, id: &str) -> String {
    format!("{}/en/detail/residence/for-sale/1000/brussels/{}", server.uri(), id)
}

fn results_page(server: &MockServer, ids: &[&str], pagination: &str) -> String {
    let links: String = ids
        .iter()
        .map(|id| format!(r#"<h2><a href="{}">Listing {}</a></h2>"#, detail_url(server, id), id))
        .collect();
    format!("<html><body>{}{}</body></html>", pagination, links)
}

fn detail_page(financial: &str) -> String {
    format!(
        r#"<html><body>
        <span class="detail__header_price_data">€ 350.000</span>
        <span class="city-line">1000 Brussels</span>
        <div class="financial w-100"><p>{}</p></div>
        <div class="general-info w-100">
            <h4>Number of bedrooms</h4><p>2</p>
            <h4>Kitchen equipment</h4><p>Fully equipped</p>
        </div>
        </body></html>"#,
        financial
    )
}

async fn mount_details(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/en/detail/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("Cadastral income")))
        .mount(server)
        .await;
}

fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.harvester.crawl_concurrency = 2;
    config.harvester.extract_concurrency = 2;
    config.harvester.batch_size = 4;
    config.harvester.page_margin = 0;
    config.http.request_timeout_secs = 5;
    config.catalog = CatalogConfig {
        base_url: format!("{}/en/real-estate", server.uri()),
        provinces: vec!["brussels".to_string()],
        towns: vec![],
        ..CatalogConfig::default()
    };
    config.output.urls_path = dir.path().join("urls.csv").display().to_string();
    config.output.records_path = dir.path().join("records.csv").display().to_string();
    config.output.cleaned_path = dir.path().join("cleaned.csv").display().to_string();
    config
}

fn options() -> PipelineOptions {
    PipelineOptions {
        batch_size: 4,
        concurrency: 2,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_discovery_then_extraction() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(
            &server,
            &["d4", "d5", "d6", "d7", "d8"],
            "",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/real-estate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(
            &server,
            &["d1", "d2", "d3", "d4", "d5"],
            r#"<ul class="pagination"><li><a data-page="2">2</a></li><li><a data-page="3">3</a></li></ul>"#,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/en/detail/residence/for-sale/1000/brussels/d3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_details(&server).await;

    // Discovery: 10 links, 2 repeated, page 3 lost
    let urls = run_discovery(&config).await.unwrap();
    assert_eq!(urls.len(), 8);
    assert_eq!(urls.as_slice()[0], detail_url(&server, "d1"));
    assert_eq!(urls.as_slice()[7], detail_url(&server, "d8"));

    // The URL file carries the set between stages
    let urls_path = dir.path().join("urls.csv");
    save_urls(&urls_path, &urls).unwrap();
    let urls = load_urls(&urls_path).unwrap();
    assert_eq!(urls.len(), 8);

    // Extraction: 2 batches of 4, one detail page missing
    let client = build_http_client(&config.http).unwrap();
    let mut pipeline = BatchPipeline::new(
        client,
        Arc::new(ImmovlanExtractor::new()),
        CountingSink::default(),
        options(),
    );
    let processed = pipeline.run(&urls).await.unwrap();
    let sink = pipeline.into_sink();

    assert_eq!(processed, 8);
    assert_eq!(sink.appends, 2);
    assert_eq!(sink.records.len(), 7);
    assert!(!sink
        .records
        .iter()
        .any(|r| r.url == detail_url(&server, "d3")));

    let record = &sink.records[0];
    assert_eq!(record.zip_code, Some(1000));
    assert_eq!(record.price, Some(350_000));
    assert_eq!(record.rooms, Some(2));
    assert_eq!(record.property_type.as_deref(), Some("House"));
    assert_eq!(record.sale_type.as_deref(), Some("for sale"));
}

#[tokio::test]
async fn test_unreachable_listing_does_not_stop_batch() {
    let server = MockServer::start().await;
    mount_details(&server).await;
    let dir = TempDir::new().unwrap();
    let records_path = dir.path().join("records.csv");

    let mut candidates: Vec<String> = (0..9)
        .map(|i| detail_url(&server, &format!("ok{}", i)))
        .collect();
    candidates.insert(4, "http://127.0.0.1:1/en/detail/villa/for-sale/1000/brussels/x".to_string());
    let urls = dedupe(candidates);

    let client = build_http_client(&Config::default().http).unwrap();
    let mut pipeline = BatchPipeline::new(
        client,
        Arc::new(ImmovlanExtractor::new()),
        CsvSink::new(&records_path),
        PipelineOptions {
            batch_size: 10,
            ..options()
        },
    );
    let processed = pipeline.run(&urls).await.unwrap();

    assert_eq!(processed, 10);
    let content = std::fs::read_to_string(&records_path).unwrap();
    assert_eq!(content.lines().count(), 10);
    assert_eq!(content.matches(&Record::COLUMNS.join(",")).count(), 1);
}

#[tokio::test]
async fn test_annuity_listing_is_excluded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/en/detail/residence/for-sale/1000/brussels/annuity"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(detail_page("Life annuity: € 800 / month")),
        )
        .mount(&server)
        .await;
    mount_details(&server).await;

    let urls = dedupe(vec![
        detail_url(&server, "annuity"),
        detail_url(&server, "plain"),
    ]);

    let client = build_http_client(&Config::default().http).unwrap();
    let mut pipeline = BatchPipeline::new(
        client,
        Arc::new(ImmovlanExtractor::new()),
        CountingSink::default(),
        options(),
    );
    let processed = pipeline.run(&urls).await.unwrap();
    let sink = pipeline.into_sink();

    assert_eq!(processed, 2);
    assert_eq!(sink.records.len(), 1);
    assert_eq!(sink.records[0].url, detail_url(&server, "plain"));
}

#[tokio::test]
async fn test_resumed_harvest_appends_missing_listings() {
    let server = MockServer::start().await;
    mount_details(&server).await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);
    let records_path = dir.path().join("records.csv");

    CsvSink::new(&records_path)
        .append(&[Record::new(detail_url(&server, "a"))])
        .unwrap();

    let mut urls = dedupe(vec![
        detail_url(&server, "a"),
        detail_url(&server, "b"),
        detail_url(&server, "c"),
    ]);
    let done = harvested_urls(&records_path).unwrap();
    urls.retain(|url| !done.contains(url));
    assert_eq!(urls.len(), 2);

    let processed = run_harvest(&config, &urls).await.unwrap();
    assert_eq!(processed, 2);

    let harvested = harvested_urls(&records_path).unwrap();
    assert_eq!(harvested.len(), 3);
    let content = std::fs::read_to_string(&records_path).unwrap();
    assert_eq!(content.lines().count(), 4);
}
