use std::path::{Path, PathBuf};

use loqa_core::{RowTable, SourceTableCatalog};
use loqa_engine::SkippedTable;

use crate::progress::Progress;

/// A row table and the file it came from.
#[derive(Debug)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub table: RowTable,
}

/// Read every table, labelling each from the catalog. Unreadable files are
/// returned as skipped; the rest of the run goes on without them.
pub fn load_tables(
    files: &[PathBuf],
    catalog: &SourceTableCatalog,
    message: &str,
) -> (Vec<LoadedTable>, Vec<SkippedTable>) {
    let progress = Progress::bar(u64::try_from(files.len()).unwrap_or(u64::MAX), message);
    let mut loaded = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        let label = catalog.label_for_path(path);
        progress.set_message(&label);
        match loqa_store::read_table(path, &label) {
            Ok(table) => loaded.push(LoadedTable {
                path: path.clone(),
                table,
            }),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "table unreadable; skipped");
                skipped.push(SkippedTable {
                    table: label,
                    reason: error.to_string(),
                });
            }
        }
        progress.inc(1);
    }

    progress.finish_clear();
    (loaded, skipped)
}

#[must_use]
pub fn display(path: &Path) -> String {
    path.display().to_string()
}
