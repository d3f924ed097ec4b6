//! Release gates evaluated after a fix pass.

use std::fmt;

use loqa_core::{FindingKind, Priority, RowTable};
use serde::Serialize;

use crate::scan::ScanReport;

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateId {
    NoFatal,
    NoFullwidth,
    NoReferenceResidue,
    NoMojibake,
    TerminologyAligned,
    StructureIntact,
}

impl GateId {
    pub const ALL: [Self; 6] = [
        Self::NoFatal,
        Self::NoFullwidth,
        Self::NoReferenceResidue,
        Self::NoMojibake,
        Self::TerminologyAligned,
        Self::StructureIntact,
    ];

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::NoFatal => 1,
            Self::NoFullwidth => 2,
            Self::NoReferenceResidue => 3,
            Self::NoMojibake => 4,
            Self::TerminologyAligned => 5,
            Self::StructureIntact => 6,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NoFatal => "zero fatal findings",
            Self::NoFullwidth => "zero full-width punctuation",
            Self::NoReferenceResidue => "zero reference-script residue",
            Self::NoMojibake => "zero encoding corruption",
            Self::TerminologyAligned => "terminology aligned",
            Self::StructureIntact => "rows and columns intact",
        }
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gate {} {}", self.number(), self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateResult {
    pub gate: GateId,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Safe,
    NotSafe,
}

impl Verdict {
    #[must_use]
    pub const fn is_safe(self) -> bool {
        matches!(self, Self::Safe)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Safe => "SAFE TO DEPLOY",
            Self::NotSafe => "NOT SAFE TO DEPLOY",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub verdict: Verdict,
    pub gates: Vec<GateResult>,
    pub audits: Vec<StructuralAudit>,
}

/// Evaluate all six gates against a post-fix rescan and the structural
/// audits. The verdict is safe only when every gate passes.
#[must_use]
pub fn evaluate_gates(rescan: &ScanReport, audits: Vec<StructuralAudit>) -> VerificationReport {
    let count = |kinds: &[FindingKind]| {
        rescan
            .worklist
            .iter()
            .filter(|entry| kinds.contains(&entry.kind))
            .count()
    };
    let zero = |gate, found: usize| GateResult {
        gate,
        passed: found == 0,
        detail: format!("{found} found"),
    };

    let fatal = rescan
        .worklist
        .iter()
        .filter(|entry| entry.priority == Priority::P0)
        .count();
    let failed_audits = audits.iter().filter(|audit| !audit.passed()).count();
    let structure = GateResult {
        gate: GateId::StructureIntact,
        passed: failed_audits == 0,
        detail: if failed_audits == 0 {
            format!("{} table(s) audited", audits.len())
        } else {
            format!("{failed_audits} of {} table(s) failed", audits.len())
        },
    };

    let gates = vec![
        zero(GateId::NoFatal, fatal),
        zero(GateId::NoFullwidth, count(&[FindingKind::FullwidthPunctuation])),
        zero(
            GateId::NoReferenceResidue,
            count(&[FindingKind::ContainsChinese, FindingKind::ChineseFragment]),
        ),
        zero(GateId::NoMojibake, count(&[FindingKind::Mojibake])),
        zero(
            GateId::TerminologyAligned,
            count(&[FindingKind::TerminologyMismatch]),
        ),
        structure,
    ];

    let verdict = if gates.iter().all(|gate| gate.passed) {
        Verdict::Safe
    } else {
        Verdict::NotSafe
    };
    VerificationReport {
        verdict,
        gates,
        audits,
    }
}

// ---------------------------------------------------------------------------
// Structural audit
// ---------------------------------------------------------------------------

/// Picks which row indices the column audit compares.
pub trait RowSampler {
    /// `amount` distinct indices below `population`, `amount < population`.
    fn sample(&mut self, population: usize, amount: usize) -> Vec<usize>;
}

/// Uniform sampling from the thread-local generator.
#[derive(Debug, Default)]
pub struct EntropySampler;

impl RowSampler for EntropySampler {
    fn sample(&mut self, population: usize, amount: usize) -> Vec<usize> {
        let mut indices =
            rand::seq::index::sample(&mut rand::rng(), population, amount.min(population))
                .into_vec();
        indices.sort_unstable();
        indices
    }
}

/// How many rows the column audit compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditScope {
    Sample(usize),
    Full,
}

/// Structural comparison of one table against its pre-fix snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralAudit {
    pub table: String,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    /// Rows whose non-target cells were compared.
    pub rows_compared: usize,
    pub row_count_ok: bool,
    pub column_count_ok: bool,
    pub other_columns_ok: bool,
    pub row_ids_ok: bool,
    pub violations: Vec<String>,
}

impl StructuralAudit {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.row_count_ok && self.column_count_ok && self.other_columns_ok && self.row_ids_ok
    }
}

/// Compare `after` with the `before` snapshot: equal row and column counts,
/// unchanged non-target cells on the audited rows, and an unchanged row-id
/// sequence.
pub fn audit_structure(
    before: &RowTable,
    after: &RowTable,
    target_column: &str,
    row_id_column: &str,
    scope: AuditScope,
    sampler: &mut dyn RowSampler,
) -> StructuralAudit {
    let mut audit = StructuralAudit {
        table: after.label.clone(),
        rows_before: before.row_count(),
        rows_after: after.row_count(),
        columns_before: before.column_count(),
        columns_after: after.column_count(),
        ..StructuralAudit::default()
    };
    audit.row_count_ok = audit.rows_before == audit.rows_after;
    audit.column_count_ok = audit.columns_before == audit.columns_after;

    let population = after.row_count().min(before.row_count());
    let indices = match scope {
        AuditScope::Sample(amount) if amount < population => sampler.sample(population, amount),
        AuditScope::Sample(_) | AuditScope::Full => (0..population).collect(),
    };
    audit.rows_compared = indices.len();

    audit.other_columns_ok = true;
    'rows: for &index in &indices {
        for (column, header) in after.headers.iter().enumerate() {
            if header.trim() == target_column {
                continue;
            }
            let Some(original) = before.column_index(header.trim()) else {
                audit.other_columns_ok = false;
                audit
                    .violations
                    .push(format!("column '{header}' is not in the snapshot"));
                break 'rows;
            };
            if before.cell(index, original) != after.cell(index, column) {
                audit.other_columns_ok = false;
                audit
                    .violations
                    .push(format!("row {index} column '{header}' changed"));
                break;
            }
        }
    }

    let (before_ids, after_ids) = (
        raw_column(before, row_id_column),
        raw_column(after, row_id_column),
    );
    audit.row_ids_ok = before_ids.len() == after_ids.len()
        && before_ids.iter().zip(&after_ids).all(|(a, b)| a == b);
    if !audit.row_ids_ok {
        audit
            .violations
            .push(format!("'{row_id_column}' sequence changed"));
    }

    if !audit.passed() {
        tracing::warn!(table = %audit.table, violations = ?audit.violations, "structural audit failed");
    }
    audit
}

fn raw_column<'a>(table: &'a RowTable, column: &str) -> Vec<&'a str> {
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    let rows = table.row_count();
    (0..rows).map(|row| table.cell(row, index)).collect()
}
