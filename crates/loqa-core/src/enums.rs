//! Priorities and the finding taxonomy.
//!
//! Both enums serialize to the literal labels reviewers see in the worklist
//! (`P0`, `UNTRANSLATED_COPY`, ...). Declaration order is evaluation and
//! report order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Severity of a finding for a human reviewer.
///
/// `P0` is fatal (the string cannot ship), `P1` is a correctness defect,
/// `P2` is cosmetic. Ordering follows severity: `P0 < P1 < P2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::P0, Self::P1, Self::P2];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }

    /// Sort rank, lowest first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::P0 => 0,
            Self::P1 => 1,
            Self::P2 => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown priority '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// FindingKind
// ---------------------------------------------------------------------------

/// The fixed finding taxonomy, in detector evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    Empty,
    UntranslatedCopy,
    ContainsChinese,
    ChineseFragment,
    Mojibake,
    FullwidthPunctuation,
    WrongTerm,
    TerminologyMismatch,
    Inconsistency,
    Whitespace,
    Capitalization,
    BrokenHtml,
}

impl FindingKind {
    pub const ALL: [Self; 12] = [
        Self::Empty,
        Self::UntranslatedCopy,
        Self::ContainsChinese,
        Self::ChineseFragment,
        Self::Mojibake,
        Self::FullwidthPunctuation,
        Self::WrongTerm,
        Self::TerminologyMismatch,
        Self::Inconsistency,
        Self::Whitespace,
        Self::Capitalization,
        Self::BrokenHtml,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::UntranslatedCopy => "UNTRANSLATED_COPY",
            Self::ContainsChinese => "CONTAINS_CHINESE",
            Self::ChineseFragment => "CHINESE_FRAGMENT",
            Self::Mojibake => "MOJIBAKE",
            Self::FullwidthPunctuation => "FULLWIDTH_PUNCTUATION",
            Self::WrongTerm => "WRONG_TERM",
            Self::TerminologyMismatch => "TERMINOLOGY_MISMATCH",
            Self::Inconsistency => "INCONSISTENCY",
            Self::Whitespace => "WHITESPACE",
            Self::Capitalization => "CAPITALIZATION",
            Self::BrokenHtml => "BROKEN_HTML",
        }
    }

    /// Priority every finding of this kind carries.
    #[must_use]
    pub const fn priority(self) -> Priority {
        match self {
            Self::Empty
            | Self::UntranslatedCopy
            | Self::ContainsChinese
            | Self::ChineseFragment
            | Self::Mojibake => Priority::P0,
            Self::FullwidthPunctuation
            | Self::WrongTerm
            | Self::TerminologyMismatch
            | Self::Inconsistency => Priority::P1,
            Self::Whitespace | Self::Capitalization | Self::BrokenHtml => Priority::P2,
        }
    }

    /// Whether a finding of this kind ends analysis of the row.
    #[must_use]
    pub const fn short_circuits(self) -> bool {
        matches!(self, Self::Empty | Self::UntranslatedCopy)
    }

    /// Whether this kind reports reference-script residue in the target.
    #[must_use]
    pub const fn is_reference_residue(self) -> bool {
        matches!(self, Self::ContainsChinese | Self::ChineseFragment)
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::Validation(format!("unknown finding kind '{s}'")))
    }
}
