//! Column names shared by every row table.

use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "简体中文".to_string()
}

fn default_context_key() -> String {
    "语言标识".to_string()
}

fn default_row_id() -> String {
    "编号ID".to_string()
}

/// Column names that do not change between target languages.
///
/// The target column is always chosen per run (`--lang`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnsConfig {
    /// Reference-language column.
    #[serde(default = "default_source")]
    pub source: String,

    /// Context-key column used for terminology lookup. Optional per table.
    #[serde(default = "default_context_key")]
    pub context_key: String,

    /// Stable row identifier column.
    #[serde(default = "default_row_id")]
    pub row_id: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            context_key: default_context_key(),
            row_id: default_row_id(),
        }
    }
}
