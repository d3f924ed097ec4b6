//! Rows, findings, and worklist entries.

use serde::{Deserialize, Serialize};

use crate::enums::{FindingKind, Priority};

/// One translatable string as seen by the detectors.
///
/// Rows are immutable inputs to detection; only the fix step rewrites the
/// stored target cell, never a `Row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Label of the source table this row belongs to.
    pub table: String,
    /// Stable identifier, unique within its table.
    pub row_id: String,
    /// Reference-language text.
    pub source: String,
    /// Text under QA.
    pub target: String,
    /// Language- and context-independent key used for terminology lookup.
    pub lookup_key: Option<String>,
}

impl Row {
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        row_id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            row_id: row_id.into(),
            source: source.into(),
            target: target.into(),
            lookup_key: None,
        }
    }

    #[must_use]
    pub fn with_lookup_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.lookup_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Lookup key, or empty when the row has none.
    #[must_use]
    pub fn lookup_key_str(&self) -> &str {
        self.lookup_key.as_deref().unwrap_or_default()
    }
}

/// A defect reported by one detector for one row.
///
/// Findings are pure data. `contribution` is the working value right after
/// this finding's transform ran (`None` when the detector proposes no
/// rewrite); `suggestion` is what a consumer should write back, possibly
/// empty when no safe automatic fix exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub priority: Priority,
    pub kind: FindingKind,
    pub current: String,
    pub contribution: Option<String>,
    pub suggestion: String,
    pub detail: String,
}

impl Finding {
    #[must_use]
    pub fn new(
        kind: FindingKind,
        current: impl Into<String>,
        contribution: Option<String>,
        detail: impl Into<String>,
    ) -> Self {
        let suggestion = contribution.clone().unwrap_or_default();
        Self {
            priority: kind.priority(),
            kind,
            current: current.into(),
            contribution,
            suggestion,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn has_suggestion(&self) -> bool {
        !self.suggestion.is_empty()
    }
}

/// One reviewable line of the sorted worklist.
///
/// `confirmed` and `manual_fix` are blank when a scan emits the entry; a
/// reviewer fills them in before the worklist is fed back to the fix step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklistEntry {
    pub seq: usize,
    pub table: String,
    pub row_id: String,
    pub priority: Priority,
    pub kind: FindingKind,
    pub context_key: String,
    pub current: String,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(default)]
    pub confirmed: String,
    #[serde(default)]
    pub manual_fix: String,
}

impl WorklistEntry {
    /// Build an unnumbered entry for a row-level finding.
    #[must_use]
    pub fn from_finding(row: &Row, finding: Finding) -> Self {
        Self {
            seq: 0,
            table: row.table.clone(),
            row_id: row.row_id.clone(),
            priority: finding.priority,
            kind: finding.kind,
            context_key: row.lookup_key_str().to_string(),
            current: finding.current,
            suggestion: finding.suggestion,
            detail: finding.detail,
            confirmed: String::new(),
            manual_fix: String::new(),
        }
    }

    /// The replacement text this entry asks for: a manual override wins over
    /// the detector suggestion. `None` when neither is filled in.
    #[must_use]
    pub fn effective_fix(&self) -> Option<&str> {
        [self.manual_fix.trim(), self.suggestion.trim()]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        !self.confirmed.trim().is_empty()
    }
}
