//! # loqa-store
//!
//! File-backed storage for loqa:
//! - row tables as UTF-8 CSV, byte-order mark preserved
//! - the reviewer worklist (quoted CSV with a byte-order mark)
//! - one-time backups and restore

mod backup;
mod error;
mod table;
mod worklist;

pub use backup::{BackupOutcome, backup_path, ensure_backup, read_backup, restore_backup};
pub use error::StoreError;
pub use table::{parse_table, read_table, render_table, write_table};
pub use worklist::{parse_worklist, read_worklist, render_worklist, worklist_path, write_worklist};
