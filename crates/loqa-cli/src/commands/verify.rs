use anyhow::Context;
use loqa_config::{LoqaConfig, VerifyConfig};
use loqa_engine::{
    AuditScope, EntropySampler, ScanSummary, SkippedTable, StructuralAudit, audit_structure,
    evaluate_gates,
};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::VerifyArgs;
use crate::commands::tables::load_tables;
use crate::output::output;

#[derive(Debug, Serialize)]
struct GateRow {
    gate: String,
    passed: bool,
    detail: String,
}

#[derive(Debug, Serialize)]
struct VerifyResponse {
    verdict: String,
    safe: bool,
    gates: Vec<GateRow>,
    audits: Vec<StructuralAudit>,
    /// Tables with no pre-fix backup to compare against.
    unaudited: Vec<String>,
    remaining: ScanSummary,
    skipped: Vec<SkippedTable>,
}

const fn audit_scope(config: &VerifyConfig) -> AuditScope {
    if config.full_audit {
        AuditScope::Full
    } else {
        AuditScope::Sample(config.sample_size)
    }
}

pub fn handle(args: &VerifyArgs, config: &LoqaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let columns = bootstrap::column_spec(config, &args.target);
    let engine = bootstrap::build_engine(config, &args.target);
    let (loaded, unreadable) = load_tables(&args.target.files, engine.catalog(), "verifying");

    let scope = audit_scope(&config.verify);
    let mut sampler = EntropySampler;
    let mut audits = Vec::new();
    let mut unaudited = Vec::new();
    for loaded in &loaded {
        let backup =
            loqa_store::read_backup(&loaded.path, &config.fix.backup_suffix, &loaded.table.label)
                .with_context(|| format!("failed to read backup of {}", loaded.path.display()))?;
        let Some(before) = backup else {
            tracing::warn!(table = %loaded.table.label, "no backup; structural audit skipped");
            unaudited.push(loaded.table.label.clone());
            continue;
        };
        audits.push(audit_structure(
            &before,
            &loaded.table,
            &columns.target,
            &columns.row_id,
            scope,
            &mut sampler,
        ));
    }

    let mut scanner = engine.scanner(&columns);
    for loaded in &loaded {
        scanner.add_table(&loaded.table);
    }
    for skipped in unreadable {
        scanner.skip(&skipped.table, skipped.reason);
    }
    let rescan = scanner.finish();

    if let Some(dir) = &args.output {
        let path = loqa_store::worklist_path(dir, &columns.target);
        loqa_store::write_worklist(&path, &rescan.worklist)
            .with_context(|| format!("failed to write worklist {}", path.display()))?;
    }

    let report = evaluate_gates(&rescan, audits);
    let verdict = report.verdict;
    tracing::info!(%verdict, "verification complete");

    output(
        &VerifyResponse {
            verdict: verdict.to_string(),
            safe: verdict.is_safe(),
            gates: report
                .gates
                .into_iter()
                .map(|gate| GateRow {
                    gate: gate.gate.to_string(),
                    passed: gate.passed,
                    detail: gate.detail,
                })
                .collect(),
            audits: report.audits,
            unaudited,
            remaining: rescan.summary,
            skipped: rescan.skipped,
        },
        flags.format,
    )?;

    if !verdict.is_safe() {
        anyhow::bail!("{verdict}");
    }
    Ok(())
}
