//! Terminology loading errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TermsError {
    #[error("Terminology document not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read terminology document {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
