//! Scan orchestration: every row of every table through the resolver, one
//! consistency pass over the union, then the sorted worklist.

use std::cmp::Reverse;

use indexmap::IndexMap;
use loqa_core::catalog::TableRank;
use loqa_core::{
    ColumnSpec, FindingKind, Priority, Row, RowTable, SourceTableCatalog, WorklistEntry,
};
use serde::Serialize;

use crate::Engine;
use crate::consistency::{ResolvedRow, check_consistency};

/// A table left out of the scan and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTable {
    pub table: String,
    pub reason: String,
}

/// Sizes of the terminology tables the scan ran with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TerminologyCounts {
    pub terms: usize,
    pub overrides: usize,
    pub forbidden: usize,
    pub fragments: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub tables: usize,
    pub rows: usize,
    pub findings: usize,
    /// Every priority, P0 first.
    pub by_priority: IndexMap<String, usize>,
    /// Kinds that occurred, in taxonomy order.
    pub by_kind: IndexMap<String, usize>,
    /// Tables with findings, in preference order.
    pub by_table: IndexMap<String, usize>,
    pub terminology: TerminologyCounts,
}

impl ScanSummary {
    #[must_use]
    pub fn count_priority(&self, priority: Priority) -> usize {
        self.by_priority.get(priority.as_str()).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn count_kind(&self, kind: FindingKind) -> usize {
        self.by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub worklist: Vec<WorklistEntry>,
    pub summary: ScanSummary,
    pub skipped: Vec<SkippedTable>,
}

/// Row-id component of the worklist order: numeric ids descending, then
/// everything else in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RowOrder {
    Numeric(Reverse<u64>),
    Other,
}

impl RowOrder {
    fn of(row_id: &str) -> Self {
        if row_id.is_empty() || !row_id.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Other;
        }
        row_id
            .parse()
            .map_or(Self::Other, |id| Self::Numeric(Reverse(id)))
    }
}

fn sort_key<'a>(
    catalog: &SourceTableCatalog,
    entry: &'a WorklistEntry,
) -> (u8, TableRank<'a>, RowOrder) {
    (
        entry.priority.rank(),
        catalog.rank(&entry.table),
        RowOrder::of(&entry.row_id),
    )
}

/// Sort worklist entries into review order and number them from 1.
///
/// Order: priority, table preference, then row id descending. The sort is
/// stable, so ties keep scan order.
pub fn order_worklist(entries: &mut [WorklistEntry], catalog: &SourceTableCatalog) {
    entries.sort_by(|a, b| sort_key(catalog, a).cmp(&sort_key(catalog, b)));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.seq = index + 1;
    }
}

/// Incremental scan over a sequence of tables.
///
/// Row-level findings are produced as each table is added; the consistency
/// pass and ordering happen in [`Scanner::finish`].
#[derive(Debug)]
pub struct Scanner<'e> {
    engine: &'e Engine,
    columns: ColumnSpec,
    rows: Vec<Row>,
    /// Fold output for each entry of `rows`.
    resolved: Vec<String>,
    entries: Vec<WorklistEntry>,
    skipped: Vec<SkippedTable>,
    tables: usize,
}

impl<'e> Scanner<'e> {
    #[must_use]
    pub const fn new(engine: &'e Engine, columns: ColumnSpec) -> Self {
        Self {
            engine,
            columns,
            rows: Vec::new(),
            resolved: Vec::new(),
            entries: Vec::new(),
            skipped: Vec::new(),
            tables: 0,
        }
    }

    /// Scan one table. A table missing a required column is recorded as
    /// skipped and contributes nothing.
    pub fn add_table(&mut self, table: &RowTable) {
        let rows = match table.rows(&self.columns) {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(table = %table.label, %error, "table skipped");
                self.skip(&table.label, error.to_string());
                return;
            }
        };

        let before = self.entries.len();
        for row in &rows {
            let resolution = self.engine.resolve(row);
            self.resolved.push(resolution.resolved);
            self.entries.extend(
                resolution
                    .findings
                    .into_iter()
                    .map(|finding| WorklistEntry::from_finding(row, finding)),
            );
        }
        tracing::debug!(
            table = %table.label,
            rows = rows.len(),
            findings = self.entries.len() - before,
            "table scanned"
        );

        self.tables += 1;
        self.rows.extend(rows);
    }

    /// Record a table that could not be loaded at all.
    pub fn skip(&mut self, table: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedTable {
            table: table.to_string(),
            reason: reason.into(),
        });
    }

    #[must_use]
    pub fn finish(mut self) -> ScanReport {
        let engine = self.engine;
        let members: Vec<ResolvedRow<'_>> = self
            .rows
            .iter()
            .zip(&self.resolved)
            .map(|(row, resolved)| ResolvedRow { row, resolved })
            .collect();
        let inconsistencies = check_consistency(&members, engine.terminology(), engine.rules());
        tracing::debug!(count = inconsistencies.len(), "consistency pass");
        for hit in inconsistencies {
            let mut entry = WorklistEntry::from_finding(hit.row, hit.finding);
            entry.context_key.clone_from(&hit.row.source);
            self.entries.push(entry);
        }

        order_worklist(&mut self.entries, engine.catalog());
        let summary = summarize(&self.entries, self.tables, self.rows.len(), engine);
        tracing::info!(
            tables = summary.tables,
            rows = summary.rows,
            findings = summary.findings,
            "scan complete"
        );

        ScanReport {
            worklist: self.entries,
            summary,
            skipped: self.skipped,
        }
    }
}

fn summarize(entries: &[WorklistEntry], tables: usize, rows: usize, engine: &Engine) -> ScanSummary {
    let by_priority = Priority::ALL
        .into_iter()
        .map(|priority| {
            let count = entries.iter().filter(|e| e.priority == priority).count();
            (priority.as_str().to_string(), count)
        })
        .collect();

    let by_kind = FindingKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let count = entries.iter().filter(|e| e.kind == kind).count();
            (count > 0).then(|| (kind.as_str().to_string(), count))
        })
        .collect();

    let mut by_table: IndexMap<String, usize> = IndexMap::new();
    for entry in entries {
        *by_table.entry(entry.table.clone()).or_default() += 1;
    }
    let catalog = engine.catalog();
    by_table.sort_by(|a, _, b, _| catalog.rank(a).cmp(&catalog.rank(b)));

    let terminology = engine.terminology();
    ScanSummary {
        tables,
        rows,
        findings: entries.len(),
        by_priority,
        by_kind,
        by_table,
        terminology: TerminologyCounts {
            terms: terminology.terms.len(),
            overrides: terminology.overrides.len(),
            forbidden: terminology.forbidden.len(),
            fragments: terminology.fragments.len(),
        },
    }
}
