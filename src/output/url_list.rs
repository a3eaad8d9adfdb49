//! Listing URL files
//!
//! The crawl stage writes its unique URL set to a one-column CSV so that the
//! scrape stage can run later, in a separate process.

use crate::crawler::{dedupe, UniqueUrlSet};
use crate::output::csv_sink::ensure_parent_dir;
use crate::output::traits::{OutputError, OutputResult};
use std::collections::HashSet;
use std::path::Path;

const URL_COLUMN: &str = "url";

/// Column holding the listing URL in a records file
const RECORD_URL_COLUMN: &str = "URL";

/// Writes the URL set, replacing any previous file
pub fn save_urls(path: &Path, urls: &UniqueUrlSet) -> OutputResult<()> {
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([URL_COLUMN])?;
    for url in urls.iter() {
        writer.write_record([url])?;
    }
    writer.flush()?;

    tracing::info!("Saved {} URLs to {}", urls.len(), path.display());
    Ok(())
}

/// Reads a URL file back into a unique set
///
/// Blank rows are ignored and repeated URLs collapse, so hand-edited files
/// are accepted.
pub fn load_urls(path: &Path) -> OutputResult<UniqueUrlSet> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut urls = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(url) = row.get(0).map(str::trim).filter(|url| !url.is_empty()) {
            urls.push(url.to_string());
        }
    }

    Ok(dedupe(urls))
}

/// URLs already present in a records file
///
/// Reads the file once, at startup of a resumed run. A missing file means
/// nothing was harvested yet; a file without a `URL` column is rejected.
pub fn harvested_urls(path: &Path) -> OutputResult<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let column = match reader
        .headers()?
        .iter()
        .position(|name| name == RECORD_URL_COLUMN)
    {
        Some(column) => column,
        None => {
            return Err(OutputError::Write(format!(
                "{} has no {} column",
                path.display(),
                RECORD_URL_COLUMN
            )))
        }
    };

    let mut urls = HashSet::new();
    for row in reader.records() {
        if let Some(url) = row?.get(column).filter(|url| !url.is_empty()) {
            urls.insert(url.to_string());
        }
    }

    Ok(urls)
}
