//! Cross-cutting error types for loqa.
//!
//! Domain-specific errors (`StoreError`, `TermsError`, `ConfigError`) live in
//! their own crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any loqa crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A row table lacks a column the run was configured to read.
    #[error("column '{column}' not found in table '{table}' (available: {available})")]
    MissingColumn {
        table: String,
        column: String,
        available: String,
    },

    /// Data failed validation (shape, format, constraints).
    #[error("validation error: {0}")]
    Validation(String),
}
