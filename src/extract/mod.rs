//! Record extraction for listing detail pages
//!
//! This module defines:
//! - The fixed `Record` shape every harvested listing is written as
//! - The `RecordExtractor` trait the extraction pipeline drives
//! - The catalog's concrete extraction rules (`ImmovlanExtractor`)

mod immovlan;
mod text;

pub use immovlan::ImmovlanExtractor;
pub use text::{clean_numeric, flag_value};

use scraper::Html;
use serde::{Deserialize, Serialize};

/// One harvested listing
///
/// Every field except the URL is optional; a value the page does not
/// provide (or provides ambiguously) is `None`, never an absent column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Locality")]
    pub locality: Option<String>,
    #[serde(rename = "Zip code")]
    pub zip_code: Option<u64>,
    #[serde(rename = "Type of property")]
    pub property_type: Option<String>,
    #[serde(rename = "Subtype of property")]
    pub subtype: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<u64>,
    #[serde(rename = "Type of sale")]
    pub sale_type: Option<String>,
    #[serde(rename = "Number of rooms")]
    pub rooms: Option<u64>,
    #[serde(rename = "Living Area")]
    pub living_area: Option<u64>,
    #[serde(rename = "Fully equipped kitchen")]
    pub kitchen: Option<String>,
    #[serde(rename = "Furnished")]
    pub furnished: Option<u8>,
    #[serde(rename = "Open fire")]
    pub open_fire: Option<u8>,
    #[serde(rename = "Terrace")]
    pub terrace: Option<u8>,
    #[serde(rename = "Terrace area")]
    pub terrace_area: Option<u64>,
    #[serde(rename = "Garden")]
    pub garden: Option<u8>,
    #[serde(rename = "Garden area")]
    pub garden_area: Option<u64>,
    #[serde(rename = "Surface of the land")]
    pub land_surface: Option<u64>,
    #[serde(rename = "Number of facades")]
    pub facades: Option<u64>,
    #[serde(rename = "Swimming pool")]
    pub swimming_pool: Option<u8>,
    #[serde(rename = "State of the building")]
    pub building_state: Option<String>,
}

impl Record {
    /// Column order of the persisted dataset, matching the field order above
    pub const COLUMNS: [&'static str; 20] = [
        "URL",
        "Locality",
        "Zip code",
        "Type of property",
        "Subtype of property",
        "Price",
        "Type of sale",
        "Number of rooms",
        "Living Area",
        "Fully equipped kitchen",
        "Furnished",
        "Open fire",
        "Terrace",
        "Terrace area",
        "Garden",
        "Garden area",
        "Surface of the land",
        "Number of facades",
        "Swimming pool",
        "State of the building",
    ];

    /// Creates a record with only the URL set
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Result of processing one detail URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// A usable record
    Record(Record),
    /// No usable record: the fetch failed or the listing was excluded
    Skip,
}

impl ExtractionOutcome {
    pub fn into_record(self) -> Option<Record> {
        match self {
            ExtractionOutcome::Record(record) => Some(record),
            ExtractionOutcome::Skip => None,
        }
    }
}

impl From<Option<Record>> for ExtractionOutcome {
    fn from(record: Option<Record>) -> Self {
        record.map_or(ExtractionOutcome::Skip, ExtractionOutcome::Record)
    }
}

/// Site-specific mapping from a parsed detail page to a record
///
/// Implementations perform no I/O, are deterministic for a given document,
/// and never panic. Missing or ambiguous markup becomes a `None` field;
/// returning `None` for the whole record is reserved for business rules that
/// exclude the listing.
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, url: &str, document: &Html) -> Option<Record>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = Record::new("https://example.com/detail/1");
        assert_eq!(record.url, "https://example.com/detail/1");
        assert_eq!(record.price, None);
        assert_eq!(record.building_state, None);
    }

    #[test]
    fn test_outcome_from_option() {
        let record = Record::new("u");
        assert_eq!(
            ExtractionOutcome::from(Some(record.clone())),
            ExtractionOutcome::Record(record)
        );
        assert_eq!(ExtractionOutcome::from(None), ExtractionOutcome::Skip);
        assert_eq!(ExtractionOutcome::Skip.into_record(), None);
    }
}
