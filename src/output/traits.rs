//! Output sink trait and error types
//!
//! This module defines the trait interface for record sinks and the errors
//! shared by every output writer.

use crate::extract::Record;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination of harvested records
///
/// The extraction pipeline calls `append` once per batch, from a single task,
/// so implementations need no internal locking.
pub trait RecordSink {
    /// Persists a batch of records
    ///
    /// The first call creates the destination and its header; later calls
    /// append without repeating the header and without re-reading what is
    /// already stored. An empty batch still creates the destination.
    ///
    /// # Arguments
    ///
    /// * `records` - The records of one batch, possibly empty
    fn append(&mut self, records: &[Record]) -> OutputResult<()>;
}
