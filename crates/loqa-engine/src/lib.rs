//! # loqa-engine
//!
//! The detection-and-correction rule engine.
//!
//! - [`rules`]: context-gated forbidden-term rewrite table
//! - [`detectors`]: the ordered detector battery
//! - [`resolver`]: per-row fold over the battery
//! - [`consistency`]: cross-row translation agreement
//! - [`scan`]: worklist assembly and ordering
//! - [`fix`] / [`verify`]: applying a worklist and gating the result
//!
//! Everything here is pure and in-memory; reading and writing tables is
//! the caller's concern.

pub mod consistency;
pub mod detectors;
pub mod fix;
pub mod resolver;
pub mod rules;
pub mod scan;
pub mod text;
pub mod verify;

pub use detectors::{DetectorSet, EngineOptions, RuleContext};
pub use fix::{FixPlan, TableFixReport, apply_fixes};
pub use resolver::{RowResolution, resolve_row};
pub use rules::{ContextKind, RuleSet, TermRule};
pub use scan::{ScanReport, ScanSummary, Scanner, SkippedTable};
pub use verify::{
    AuditScope, EntropySampler, GateId, GateResult, RowSampler, StructuralAudit,
    VerificationReport, Verdict, audit_structure, evaluate_gates,
};

use loqa_core::{ColumnSpec, Row, RowTable, SourceTableCatalog, TerminologyTables};

/// Terminology, rules, detectors and table ordering for one run.
#[derive(Debug, Default)]
pub struct Engine {
    terminology: TerminologyTables,
    rules: RuleSet,
    options: EngineOptions,
    detectors: DetectorSet,
    catalog: SourceTableCatalog,
}

impl Engine {
    #[must_use]
    pub fn new(terminology: TerminologyTables) -> Self {
        Self {
            terminology,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_detectors(mut self, detectors: DetectorSet) -> Self {
        self.detectors = detectors;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: SourceTableCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub const fn terminology(&self) -> &TerminologyTables {
        &self.terminology
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub const fn catalog(&self) -> &SourceTableCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn context(&self) -> RuleContext<'_> {
        RuleContext {
            terminology: &self.terminology,
            rules: &self.rules,
            options: &self.options,
        }
    }

    /// Run the detector battery over one row.
    #[must_use]
    pub fn resolve(&self, row: &Row) -> RowResolution {
        resolve_row(&self.detectors, self.context(), row)
    }

    /// Start an incremental scan.
    #[must_use]
    pub fn scanner(&self, columns: &ColumnSpec) -> Scanner<'_> {
        Scanner::new(self, columns.clone())
    }

    /// Scan a set of tables in one call.
    #[must_use]
    pub fn scan<'t>(
        &self,
        tables: impl IntoIterator<Item = &'t RowTable>,
        columns: &ColumnSpec,
    ) -> ScanReport {
        let mut scanner = self.scanner(columns);
        for table in tables {
            scanner.add_table(table);
        }
        scanner.finish()
    }
}
