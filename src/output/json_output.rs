//! Structured JSON output
//!
//! The full record sequence as a pretty-printed JSON array, with the infobox
//! preserved as a nested key/value object in extraction order.

use crate::extract::Record;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records as pretty-printed JSON, overwriting the destination
///
/// # Arguments
///
/// * `records` - The records to serialize
/// * `path` - Destination file path
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the document
/// * `Err(OutputError)` - The destination was unwritable or encoding failed
pub fn write_structured(records: &[Record], path: &Path) -> OutputResult<()> {
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, records)?;
    file.write_all(b"\n")?;
    Ok(())
}
