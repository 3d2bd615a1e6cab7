//! CSV artifact writer.
//!
//! Emits the fixed nine-column header followed by one record per row, with
//! no synthetic row-index column. `created_on` is rendered as
//! [`crate::types::CREATED_ON_FORMAT`].

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExtractResult;
use crate::types::{COLUMNS, InvoiceTable};

/// Write the table as CSV to any [`Write`] sink.
///
/// The header is written unconditionally, so an empty table still produces
/// a valid (header-only) artifact.
pub fn write_csv<W: Write>(table: &InvoiceTable, writer: W) -> ExtractResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for row in &table.rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table as CSV to a file, creating or truncating it.
pub fn write_csv_to_path(table: &InvoiceTable, path: impl AsRef<Path>) -> ExtractResult<()> {
    let file = File::create(path)?;
    write_csv(table, file)
}
