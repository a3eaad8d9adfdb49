use crate::config::types::{CatalogConfig, Config, HarvesterConfig, HttpConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_harvester_config(&config.harvester)?;
    validate_http_config(&config.http)?;
    validate_catalog_config(&config.catalog)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates pool sizes, batch size and the pagination margin
fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    validate_pool_size("crawl_concurrency", config.crawl_concurrency)?;
    validate_pool_size("extract_concurrency", config.extract_concurrency)?;

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if config.page_margin > 1000 {
        return Err(ConfigError::Validation(format!(
            "page_margin must be <= 1000, got {}",
            config.page_margin
        )));
    }

    Ok(())
}

fn validate_pool_size(name: &str, size: usize) -> Result<(), ConfigError> {
    if !(1..=100).contains(&size) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and 100, got {}",
            name, size
        )));
    }
    Ok(())
}

/// Validates request identification and timeouts
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the search endpoint, partitions and exclusion patterns
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.query().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must not carry a query string",
            config.base_url
        )));
    }

    if config.provinces.is_empty() && config.towns.is_empty() {
        return Err(ConfigError::Validation(
            "at least one province or town partition is required".to_string(),
        ));
    }

    for slug in config.provinces.iter().chain(&config.towns) {
        validate_slug(slug)?;
    }

    for pattern in &config.exclude_patterns {
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "Exclusion pattern cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Partition slugs are pasted into the query string verbatim
fn validate_slug(slug: &str) -> Result<(), ConfigError> {
    if slug.is_empty() {
        return Err(ConfigError::Validation(
            "Partition slug cannot be empty".to_string(),
        ));
    }

    if !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "Partition slug '{}' must contain only ASCII letters, digits and hyphens",
            slug
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("urls_path", &config.urls_path),
        ("records_path", &config.records_path),
        ("cleaned_path", &config.cleaned_path),
    ] {
        if path.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    if config.records_path == config.cleaned_path {
        return Err(ConfigError::Validation(
            "cleaned_path must differ from records_path".to_string(),
        ));
    }

    Ok(())
}
