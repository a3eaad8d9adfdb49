//! Post-harvest dataset cleaning
//!
//! Rewrites the raw records file into an analysis-friendly one: the city name
//! is split out of the locality, and the kitchen and building condition
//! labels are mapped onto ordinal scales.

use crate::extract::Record;
use crate::output::{OutputError, OutputResult};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

const CITY_PATTERN: &str = r"[A-Za-zÀ-ÿ-]+";

/// One row of the cleaned dataset
///
/// Same columns as [`Record`] without the locality, with `City` inserted after
/// the zip code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Zip code")]
    pub zip_code: Option<u64>,
    #[serde(rename = "City")]
    pub city: Option<String>,
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
    pub kitchen: Option<u8>,
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
    pub building_state: Option<u8>,
}

impl CleanRecord {
    /// Cleans one raw record; `row` is only used in warnings
    pub fn from_record(record: Record, row: usize) -> Self {
        let kitchen = record.kitchen.as_deref().and_then(|label| {
            let scaled = kitchen_scale(label);
            if scaled.is_none() {
                tracing::warn!("Kitchen label out of scale at row {}: {:?}", row, label);
            }
            scaled
        });

        let building_state = record.building_state.as_deref().and_then(|label| {
            let scaled = building_state_scale(label);
            if scaled.is_none() {
                tracing::warn!(
                    "Building condition out of scale at row {}: {:?}",
                    row,
                    label
                );
            }
            scaled
        });

        Self {
            city: record.locality.as_deref().and_then(city_from_locality),
            url: record.url,
            zip_code: record.zip_code,
            property_type: record.property_type,
            subtype: record.subtype,
            price: record.price,
            sale_type: record.sale_type,
            rooms: record.rooms,
            living_area: record.living_area,
            kitchen,
            furnished: record.furnished,
            open_fire: record.open_fire,
            terrace: record.terrace,
            terrace_area: record.terrace_area,
            garden: record.garden,
            garden_area: record.garden_area,
            land_surface: record.land_surface,
            facades: record.facades,
            swimming_pool: record.swimming_pool,
            building_state,
        }
    }
}

/// Kitchen equipment level, from 0 (not equipped) to 3 (fully equipped)
pub fn kitchen_scale(label: &str) -> Option<u8> {
    match label {
        "Fully equipped" => Some(3),
        "Super equipped" => Some(2),
        "Partially equipped" => Some(1),
        "Not equipped" => Some(0),
        _ => None,
    }
}

/// Building condition, from 0 (needs renovation) to 4 (new)
pub fn building_state_scale(label: &str) -> Option<u8> {
    match label {
        "New" => Some(4),
        "Fully renovated" => Some(3),
        "Excellent" => Some(2),
        "Normal" => Some(1),
        "To renovate" | "To be renovated" => Some(0),
        _ => None,
    }
}

fn city_regex() -> Option<&'static Regex> {
    static CITY: OnceLock<Option<Regex>> = OnceLock::new();
    CITY.get_or_init(|| match Regex::new(CITY_PATTERN) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::error!("Invalid city pattern: {}", e);
            None
        }
    })
    .as_ref()
}

/// First run of letters or dashes in a locality such as `1000 Brussels`
pub fn city_from_locality(locality: &str) -> Option<String> {
    city_regex()?
        .find(locality)
        .map(|m| m.as_str().to_string())
}

/// Rewrites a raw records file into its cleaned form
///
/// The output file is replaced. Returns the number of rows written.
pub fn clean_dataset(input: &Path, output: &Path) -> OutputResult<usize> {
    let mut reader = csv::Reader::from_path(input)?;
    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()?;

    if records.is_empty() {
        return Err(OutputError::Write(format!(
            "no records to clean in {}",
            input.display()
        )));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(output)?;

    let written = records.len();
    for (row, record) in records.into_iter().enumerate() {
        writer.serialize(CleanRecord::from_record(record, row + 1))?;
    }
    writer.flush()?;
    tracing::info!(
        "Cleaned {} records from {} into {}",
        written,
        input.display(),
        output.display()
    );
    Ok(written)
}
