//! Row tables as UTF-8 CSV files.

use std::fs;
use std::path::Path;

use loqa_core::RowTable;

use crate::error::StoreError;

pub(crate) const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strip a leading UTF-8 byte-order mark.
pub(crate) fn strip_bom(bytes: &[u8]) -> (&[u8], bool) {
    bytes
        .strip_prefix(BOM)
        .map_or((bytes, false), |rest| (rest, true))
}

/// Parse CSV bytes (optionally BOM-prefixed) into a table labelled `label`.
///
/// The first record is the header. Records may be ragged; short ones read
/// as empty cells.
pub fn parse_table(bytes: &[u8], label: &str, path: &Path) -> Result<RowTable, StoreError> {
    let (body, has_bom) = strip_bom(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(body);

    let headers = reader
        .headers()
        .map_err(|source| StoreError::csv(path, source))?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| StoreError::csv(path, source))?;
        records.push(record.iter().map(ToString::to_string).collect());
    }

    let mut table = RowTable::new(label, headers, records);
    table.has_bom = has_bom;
    Ok(table)
}

/// Read a CSV row table from disk.
pub fn read_table(path: &Path, label: &str) -> Result<RowTable, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::io(path, source))?;
    let table = parse_table(&bytes, label, path)?;
    tracing::debug!(
        path = %path.display(),
        label,
        rows = table.row_count(),
        columns = table.column_count(),
        bom = table.has_bom,
        "table read"
    );
    Ok(table)
}

/// Serialize a table to CSV bytes, keeping its byte-order-mark state.
pub fn render_table(table: &RowTable, path: &Path) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    if table.has_bom {
        out.extend_from_slice(BOM);
    }
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer
        .write_record(&table.headers)
        .map_err(|source| StoreError::csv(path, source))?;
    for record in &table.records {
        writer
            .write_record(record)
            .map_err(|source| StoreError::csv(path, source))?;
    }
    writer
        .into_inner()
        .map_err(|error| StoreError::io(path, error.into_error()))
}

/// Write a table back to disk.
pub fn write_table(path: &Path, table: &RowTable) -> Result<(), StoreError> {
    let bytes = render_table(table, path)?;
    fs::write(path, bytes).map_err(|source| StoreError::io(path, source))?;
    tracing::debug!(path = %path.display(), rows = table.row_count(), "table written");
    Ok(())
}
