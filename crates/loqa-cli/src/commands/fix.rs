use std::path::PathBuf;

use anyhow::Context;
use loqa_config::LoqaConfig;
use loqa_engine::{FixPlan, SkippedTable, TableFixReport, apply_fixes};
use loqa_store::BackupOutcome;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FixArgs;
use crate::commands::tables::{display, load_tables};
use crate::output::output;

#[derive(Debug, Serialize)]
struct FixResponse {
    worklist: PathBuf,
    /// Distinct (table, row) replacements loaded from the worklist.
    instructions: usize,
    dry_run: bool,
    tables: Vec<TableFixReport>,
    backups_created: Vec<String>,
    skipped: Vec<SkippedTable>,
}

pub fn handle(args: &FixArgs, config: &LoqaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = loqa_store::read_worklist(&args.worklist)
        .with_context(|| format!("failed to read worklist {}", args.worklist.display()))?;
    let plan = FixPlan::from_worklist(&entries, config.fix.require_confirmation);
    tracing::info!(entries = entries.len(), instructions = plan.len(), "fix plan loaded");

    let (loaded, mut skipped) = load_tables(&args.files, &config.tables, "fixing");

    let mut tables = Vec::with_capacity(loaded.len());
    let mut backups_created = Vec::new();
    for mut loaded in loaded {
        let report = match apply_fixes(
            &mut loaded.table,
            &args.lang,
            &config.columns.row_id,
            &plan,
        ) {
            Ok(report) => report,
            Err(error) => {
                tracing::warn!(table = %loaded.table.label, %error, "table skipped");
                skipped.push(SkippedTable {
                    table: loaded.table.label.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
        };

        if !args.dry_run && report.modified > 0 {
            let outcome = loqa_store::ensure_backup(&loaded.path, &config.fix.backup_suffix)
                .with_context(|| format!("failed to back up {}", loaded.path.display()))?;
            if outcome == BackupOutcome::Created {
                backups_created.push(display(&loqa_store::backup_path(
                    &loaded.path,
                    &config.fix.backup_suffix,
                )));
            }
            loqa_store::write_table(&loaded.path, &loaded.table)
                .with_context(|| format!("failed to write {}", loaded.path.display()))?;
        }

        tracing::info!(
            table = %report.table,
            modified = report.modified,
            unchanged = report.unchanged,
            dry_run = args.dry_run,
            "table fixed"
        );
        tables.push(report);
    }

    output(
        &FixResponse {
            worklist: args.worklist.clone(),
            instructions: plan.len(),
            dry_run: args.dry_run,
            tables,
            backups_created,
            skipped,
        },
        flags.format,
    )
}
