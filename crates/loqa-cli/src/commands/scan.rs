use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use loqa_config::LoqaConfig;
use loqa_engine::{ScanSummary, SkippedTable};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScanArgs;
use crate::commands::tables::load_tables;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ScanResponse {
    generated_at: DateTime<Utc>,
    target: String,
    worklist: PathBuf,
    summary: ScanSummary,
    skipped: Vec<SkippedTable>,
}

pub fn handle(args: &ScanArgs, config: &LoqaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let columns = bootstrap::column_spec(config, &args.target);
    let engine = bootstrap::build_engine(config, &args.target);
    let (loaded, unreadable) = load_tables(&args.target.files, engine.catalog(), "scanning");

    let mut scanner = engine.scanner(&columns);
    for loaded in &loaded {
        scanner.add_table(&loaded.table);
    }
    for skipped in unreadable {
        scanner.skip(&skipped.table, skipped.reason);
    }
    let report = scanner.finish();

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.general.output_dir.clone());
    let path = loqa_store::worklist_path(&output_dir, &columns.target);
    loqa_store::write_worklist(&path, &report.worklist)
        .with_context(|| format!("failed to write worklist {}", path.display()))?;

    output(
        &ScanResponse {
            generated_at: Utc::now(),
            target: columns.target,
            worklist: path,
            summary: report.summary,
            skipped: report.skipped,
        },
        flags.format,
    )
}
