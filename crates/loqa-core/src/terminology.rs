//! Terminology lookup tables.
//!
//! Built once per run from the terminology document and read-only afterwards.
//! All maps keep source-declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A translation a reviewer has flagged as wrong, with its correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenUsage {
    pub correct: String,
    /// Source text the usage was reported against, possibly empty.
    pub source: String,
}

/// Where a standard translation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardTier {
    Override,
    Term,
}

/// A standard translation and the key that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardMatch<'a> {
    pub key: &'a str,
    pub standard: &'a str,
    pub tier: StandardTier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyTables {
    /// General term table: source text → standard target text.
    pub terms: IndexMap<String, String>,
    /// Authoritative overrides, consulted before `terms`.
    pub overrides: IndexMap<String, String>,
    /// Reference-script substring → replacement, applied in order.
    pub fragments: IndexMap<String, String>,
    /// Known wrong translations → correction.
    pub forbidden: IndexMap<String, ForbiddenUsage>,
}

impl TerminologyTables {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
            && self.overrides.is_empty()
            && self.fragments.is_empty()
            && self.forbidden.is_empty()
    }

    /// Resolve the standard translation for a row.
    ///
    /// Order: overrides by lookup key, overrides by source, terms by lookup
    /// key, then terms by source when the source is at most
    /// `max_source_chars` characters long.
    #[must_use]
    pub fn standard_for<'a>(
        &'a self,
        lookup_key: &'a str,
        source: &'a str,
        max_source_chars: usize,
    ) -> Option<StandardMatch<'a>> {
        let hit = |map: &'a IndexMap<String, String>, key: &'a str, tier| {
            if key.is_empty() {
                return None;
            }
            map.get(key).map(|standard| StandardMatch {
                key,
                standard: standard.as_str(),
                tier,
            })
        };

        hit(&self.overrides, lookup_key, StandardTier::Override)
            .or_else(|| hit(&self.overrides, source, StandardTier::Override))
            .or_else(|| hit(&self.terms, lookup_key, StandardTier::Term))
            .or_else(|| {
                if source.chars().count() <= max_source_chars {
                    hit(&self.terms, source, StandardTier::Term)
                } else {
                    None
                }
            })
    }

    /// Standard translation for an exact source text: overrides, then terms.
    #[must_use]
    pub fn standard_for_source(&self, source: &str) -> Option<&str> {
        self.overrides
            .get(source)
            .or_else(|| self.terms.get(source))
            .map(String::as_str)
    }
}
