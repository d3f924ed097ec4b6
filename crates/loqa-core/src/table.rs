//! In-memory row tables.
//!
//! A [`RowTable`] is the materialized content of one tabular input: a header
//! row and string records. Reading and writing files is `loqa-store`'s job;
//! this type only knows columns and cells.

use serde::{Deserialize, Serialize};

use crate::entities::Row;
use crate::errors::CoreError;

/// Which columns of a row table feed the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub target: String,
    pub source: String,
    pub context_key: Option<String>,
    pub row_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    /// Source-table label (`APP`, `H5`, or a file name).
    pub label: String,
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
    /// Whether the file carried a UTF-8 byte-order mark.
    pub has_bom: bool,
}

impl RowTable {
    #[must_use]
    pub fn new(label: impl Into<String>, headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self {
            label: label.into(),
            headers,
            records,
            has_bom: false,
        }
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header.trim() == column)
    }

    /// Index of a column the run cannot do without.
    pub fn require_column(&self, column: &str) -> Result<usize, CoreError> {
        self.column_index(column)
            .ok_or_else(|| CoreError::MissingColumn {
                table: self.label.clone(),
                column: column.to_string(),
                available: self.headers.join(", "),
            })
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cell value; ragged records read missing cells as empty.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.records
            .get(row)
            .and_then(|record| record.get(column))
            .map_or("", String::as_str)
    }

    /// Overwrite one cell, padding a ragged record if needed.
    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        let Some(record) = self.records.get_mut(row) else {
            return;
        };
        if record.len() <= column {
            record.resize(column + 1, String::new());
        }
        record[column] = value;
    }

    /// Row identifiers in table order, trimmed. Empty when the table has no
    /// identifier column.
    #[must_use]
    pub fn row_ids(&self, row_id_column: &str) -> Vec<String> {
        let Some(index) = self.column_index(row_id_column) else {
            return Vec::new();
        };
        (0..self.records.len())
            .map(|row| self.cell(row, index).trim().to_string())
            .collect()
    }

    /// Project every record onto the engine's [`Row`] model.
    ///
    /// Fails when the target, source, or identifier column is absent. The
    /// context-key column is optional.
    pub fn rows(&self, columns: &ColumnSpec) -> Result<Vec<Row>, CoreError> {
        let target = self.require_column(&columns.target)?;
        let source = self.require_column(&columns.source)?;
        let key = columns
            .context_key
            .as_deref()
            .and_then(|column| self.column_index(column));
        let row_id = self.require_column(&columns.row_id)?;

        Ok((0..self.records.len())
            .map(|index| {
                let row = Row::new(
                    self.label.clone(),
                    self.cell(index, row_id).trim(),
                    self.cell(index, source).trim(),
                    self.cell(index, target),
                );
                match key {
                    Some(column) => row.with_lookup_key(self.cell(index, column).trim()),
                    None => row,
                }
            })
            .collect())
    }
}
