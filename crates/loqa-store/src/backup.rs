//! Pre-fix snapshots of row tables.
//!
//! The first fix pass copies each table to `<stem><suffix>.<ext>`. Later
//! passes leave that copy alone, so it always holds the pristine original.

use std::fs;
use std::path::{Path, PathBuf};

use loqa_core::RowTable;

use crate::error::StoreError;
use crate::table::read_table;

/// Whether a backup was made by this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    Created,
    AlreadyPresent,
}

/// `dir/app.csv` with suffix `_backup_original` → `dir/app_backup_original.csv`.
#[must_use]
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

/// Copy `path` to its backup unless a backup already exists.
pub fn ensure_backup(path: &Path, suffix: &str) -> Result<BackupOutcome, StoreError> {
    let backup = backup_path(path, suffix);
    if backup.exists() {
        return Ok(BackupOutcome::AlreadyPresent);
    }
    fs::copy(path, &backup).map_err(|source| StoreError::io(&backup, source))?;
    tracing::info!(table = %path.display(), backup = %backup.display(), "backup created");
    Ok(BackupOutcome::Created)
}

/// Load the backup of `path`, if there is one.
pub fn read_backup(path: &Path, suffix: &str, label: &str) -> Result<Option<RowTable>, StoreError> {
    let backup = backup_path(path, suffix);
    if !backup.exists() {
        return Ok(None);
    }
    read_table(&backup, label).map(Some)
}

/// Copy the backup back over `path`. Returns the backup's location.
pub fn restore_backup(path: &Path, suffix: &str) -> Result<PathBuf, StoreError> {
    let backup = backup_path(path, suffix);
    if !backup.exists() {
        return Err(StoreError::BackupMissing {
            table: path.to_path_buf(),
            backup,
        });
    }
    fs::copy(&backup, path).map_err(|source| StoreError::io(path, source))?;
    tracing::info!(table = %path.display(), backup = %backup.display(), "table restored");
    Ok(backup)
}
