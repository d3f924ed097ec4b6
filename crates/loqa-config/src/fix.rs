//! Fix step settings.

use serde::{Deserialize, Serialize};

fn default_backup_suffix() -> String {
    "_backup_original".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FixConfig {
    /// Only apply worklist entries whose confirmation field is filled in.
    #[serde(default)]
    pub require_confirmation: bool,

    /// Appended to a table's file stem to name its pre-fix backup.
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            require_confirmation: false,
            backup_suffix: default_backup_suffix(),
        }
    }
}
