//! Statistics over a harvested records file
//!
//! This module provides functionality for summarizing and displaying what
//! a harvest produced, without loading records into memory.

use crate::output::traits::OutputResult;
use std::collections::BTreeMap;
use std::path::Path;

const PROPERTY_TYPE_COLUMN: &str = "Type of property";
const SALE_TYPE_COLUMN: &str = "Type of sale";

/// Dataset statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStatistics {
    /// Number of data rows
    pub total_records: u64,

    /// Rows per property type (`unknown` when empty)
    pub by_property_type: BTreeMap<String, u64>,

    /// Rows per sale type (`unknown` when empty)
    pub by_sale_type: BTreeMap<String, u64>,

    /// Non-empty values per column, in file column order
    pub column_coverage: Vec<(String, u64)>,
}

/// Streams a records file and counts what it contains
///
/// # Arguments
///
/// * `path` - A records CSV with a header row
///
/// # Returns
///
/// * `Ok(DatasetStatistics)` - Successfully computed statistics
/// * `Err(OutputError)` - The file is missing or malformed
pub fn load_statistics(path: &Path) -> OutputResult<DatasetStatistics> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let type_column = headers.iter().position(|h| h == PROPERTY_TYPE_COLUMN);
    let sale_column = headers.iter().position(|h| h == SALE_TYPE_COLUMN);

    let mut stats = DatasetStatistics {
        column_coverage: headers.iter().map(|h| (h.to_string(), 0)).collect(),
        ..DatasetStatistics::default()
    };

    for row in reader.records() {
        let row = row?;
        stats.total_records += 1;

        for (index, value) in row.iter().enumerate() {
            if !value.is_empty() {
                if let Some((_, filled)) = stats.column_coverage.get_mut(index) {
                    *filled += 1;
                }
            }
        }

        if let Some(column) = type_column {
            *stats
                .by_property_type
                .entry(category(row.get(column)))
                .or_insert(0) += 1;
        }
        if let Some(column) = sale_column {
            *stats
                .by_sale_type
                .entry(category(row.get(column)))
                .or_insert(0) += 1;
        }
    }

    Ok(stats)
}

fn category(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &DatasetStatistics) {
    println!("=== Dataset Statistics ===\n");

    println!("Overview:");
    println!("  Total records: {}", stats.total_records);
    println!();

    print_breakdown("Property Types", &stats.by_property_type, stats.total_records);
    print_breakdown("Sale Types", &stats.by_sale_type, stats.total_records);

    println!("Field Coverage:");
    for (column, filled) in &stats.column_coverage {
        println!(
            "  {}: {} ({:.1}%)",
            column,
            filled,
            share(*filled, stats.total_records)
        );
    }
}

fn print_breakdown(title: &str, counts: &BTreeMap<String, u64>, total: u64) {
    if counts.is_empty() {
        return;
    }

    println!("{}:", title);
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1));

    for (name, count) in sorted {
        println!("  {}: {} ({:.1}%)", name, count, share(*count, total));
    }
    println!();
}

fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}
