//! Output module for serializing crawl results
//!
//! This module handles:
//! - Writing the tabular CSV format (one row per record)
//! - Writing the structured JSON format (nested infobox preserved)
//! - Recording crawl statistics
//!
//! Writers are pure serialization: no extraction logic, no network access,
//! and a total overwrite of the destination file. Write failures are real
//! data loss and always surface to the caller.

mod csv_output;
mod json_output;
pub mod stats;

pub use csv_output::write_tabular;
pub use json_output::write_structured;
pub use stats::CrawlStats;

use crate::extract::Record;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes both output files for a listing into the given directory
///
/// Produces `<name>_data.csv` and `<name>_data.json`, overwriting existing
/// files.
///
/// # Arguments
///
/// * `name` - The listing's logical name, used as the filename prefix
/// * `records` - The records extracted from that listing
/// * `directory` - Destination directory (must exist)
///
/// # Returns
///
/// * `Ok((csv_path, json_path))` - Paths of the written files
/// * `Err(OutputError)` - Either write failed
pub fn write_outputs(
    name: &str,
    records: &[Record],
    directory: &Path,
) -> OutputResult<(PathBuf, PathBuf)> {
    let csv_path = directory.join(format!("{}_data.csv", name));
    let json_path = directory.join(format!("{}_data.json", name));

    write_tabular(records, &csv_path)?;
    write_structured(records, &json_path)?;

    Ok((csv_path, json_path))
}
