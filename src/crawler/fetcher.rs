//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the shared HTTP client with identification headers
//! - GET requests with a per-request timeout
//! - Error classification into plain data
//!
//! Fetch failures are never returned as `Err`. Every upstream stage treats
//! them as ordinary values and degrades instead of aborting.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

/// Kind of transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailure {
    /// The request did not complete within its timeout
    Timeout,
    /// The connection could not be established
    Connect,
    /// Anything else, including a body that failed to download
    Other,
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Status 200 with the page body
    Success {
        /// Page body content
        body: String,
    },

    /// Any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Timeout, refused connection, or other transport error
    NetworkError {
        /// Failure classification
        kind: NetworkFailure,
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchResult::Success { body } => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchResult::Success { body } => write!(f, "ok ({} bytes)", body.len()),
            FetchResult::HttpError { status_code } => write!(f, "HTTP {}", status_code),
            FetchResult::NetworkError { kind, error } => write!(f, "{:?}: {}", kind, error),
        }
    }
}

/// Builds the HTTP client shared by every worker of a run
///
/// # Arguments
///
/// * `config` - Identification headers and connect timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use immo_harvest::config::HttpConfig;
/// use immo_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, without retries
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout | `NetworkError(Timeout)` |
/// | Connection refused / DNS | `NetworkError(Connect)` |
/// | Body read failure, other | `NetworkError(Other)` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Upper bound for the whole request, body included
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { body },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let kind = if e.is_timeout() {
        NetworkFailure::Timeout
    } else if e.is_connect() {
        NetworkFailure::Connect
    } else {
        NetworkFailure::Other
    };

    FetchResult::NetworkError {
        kind,
        error: e.to_string(),
    }
}
