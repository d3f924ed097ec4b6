//! The ordered detector battery.
//!
//! Each detector is a pure function of the row, the shared lookup tables, and
//! the working target value left by the detectors before it. A detector that
//! proposes a rewrite returns the new working value; the resolver threads it
//! into the next detector.

mod capitalization;
mod html;
mod mojibake;
mod presence;
mod punctuation;
mod residue;
mod terminology;
mod whitespace;
mod wrong_term;

pub use capitalization::Capitalization;
pub use html::{BrokenHtml, has_broken_html};
pub use mojibake::{Mojibake, has_mojibake};
pub use presence::{EmptyTarget, UntranslatedCopy};
pub use punctuation::FullwidthPunctuation;
pub use residue::ReferenceResidue;
pub use terminology::TerminologyMismatch;
pub use whitespace::Whitespace;
pub use wrong_term::WrongTerm;

use loqa_core::{FindingKind, Row, TerminologyTables};

use crate::rules::RuleSet;

/// Tunables that affect detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// The term table is consulted by source text only for sources at most
    /// this many characters long.
    pub max_source_chars: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_source_chars: 8,
        }
    }
}

/// Read-only lookup state shared by every detector during a run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub terminology: &'a TerminologyTables,
    pub rules: &'a RuleSet,
    pub options: &'a EngineOptions,
}

/// What a detector reports for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub kind: FindingKind,
    /// New working value, when the detector can repair the text.
    pub rewrite: Option<String>,
    pub detail: String,
}

impl Detection {
    #[must_use]
    pub fn flag(kind: FindingKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            rewrite: None,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn repair(kind: FindingKind, rewrite: String, detail: impl Into<String>) -> Self {
        Self {
            kind,
            rewrite: Some(rewrite),
            detail: detail.into(),
        }
    }
}

pub trait Detector: Send + Sync {
    /// Stable name for logs.
    fn name(&self) -> &'static str;

    /// Inspect one row. `working` is the target as rewritten so far.
    fn inspect(&self, ctx: RuleContext<'_>, row: &Row, working: &str) -> Option<Detection>;
}

/// Detectors in evaluation order.
pub struct DetectorSet {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl DetectorSet {
    /// The full battery: presence, residue, corruption, punctuation, terms,
    /// then cosmetics.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(EmptyTarget),
            Box::new(UntranslatedCopy),
            Box::new(ReferenceResidue),
            Box::new(Mojibake),
            Box::new(FullwidthPunctuation),
            Box::new(WrongTerm),
            Box::new(TerminologyMismatch),
            Box::new(Whitespace),
            Box::new(Capitalization),
            Box::new(BrokenHtml),
        ])
    }

    #[must_use]
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl std::fmt::Debug for DetectorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.detectors.iter().map(|detector| detector.name()))
            .finish()
    }
}
