//! Comma-separated export of result tables

use crate::output::table::ResultTable;
use crate::ScrapeError;
use std::io::Write;
use std::path::Path;

/// Writes a table to any writer: header row, then one row per record
///
/// A table without columns writes nothing at all; rows that carry no keys
/// are reported with a warning since they cannot be represented.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<(), ScrapeError> {
    let mut wtr = csv::Writer::from_writer(writer);

    if table.width() == 0 && !table.is_empty() {
        tracing::warn!(
            "{} rows have no fields; nothing to write for them",
            table.len()
        );
    }

    if table.width() > 0 {
        wtr.write_record(table.columns())?;
        for row in table.rows() {
            wtr.write_record(table.aligned_row(row))?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a table to a file, replacing any existing file
///
/// The write is not atomic; a crash mid-write leaves a partial file.
pub fn save_csv(table: &ResultTable, path: &Path) -> Result<(), ScrapeError> {
    let file = std::fs::File::create(path)?;
    write_csv(table, std::io::BufWriter::new(file))?;
    tracing::info!("Data saved to {} ({} rows)", path.display(), table.len());
    Ok(())
}
