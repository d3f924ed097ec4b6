//! Verification settings.

use serde::{Deserialize, Serialize};

/// Default number of rows sampled by the structural audit.
const fn default_sample_size() -> usize {
    20
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// Rows compared column-by-column against the backup.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Compare every row instead of a random sample.
    #[serde(default)]
    pub full_audit: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            full_audit: false,
        }
    }
}
