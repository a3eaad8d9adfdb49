//! Output module for persisting harvest results
//!
//! This module handles:
//! - The record sink interface the extraction pipeline writes through
//! - Appending records to a CSV dataset
//! - Saving and loading discovered URL lists
//! - Dataset statistics

mod csv_sink;
pub mod stats;
mod traits;
mod url_list;

pub use csv_sink::CsvSink;
pub use stats::{load_statistics, print_statistics, DatasetStatistics};
pub use traits::{OutputError, OutputResult, RecordSink};
pub use url_list::{harvested_urls, load_urls, save_urls};
