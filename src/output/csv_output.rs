//! Tabular CSV output
//!
//! Fixed three-column layout with a header row. The infobox column holds the
//! attribute mapping as a JSON-encoded object so the table stays flat while
//! remaining machine-recoverable.

use crate::extract::Record;
use crate::output::OutputResult;
use std::fs::File;
use std::path::Path;

/// Writes records as CSV, overwriting the destination
///
/// # Arguments
///
/// * `records` - The records to serialize
/// * `path` - Destination file path
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote all rows
/// * `Err(OutputError)` - The destination was unwritable or encoding failed
pub fn write_tabular(records: &[Record], path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Title", "Content", "Infobox"])?;

    for record in records {
        let infobox = serde_json::to_string(&record.infobox)?;
        writer.write_record([&record.title, &record.content, &infobox])?;
    }

    writer.flush()?;
    Ok(())
}
