//! Drift from the standard translation in the terminology tables.

use loqa_core::fullwidth::normalize_fullwidth;
use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};
use crate::text::normalize_for_compare;

/// Flags targets that differ from the override or term-table standard.
///
/// The rewrite is always the standard itself. A standard that still
/// mentions a forbidden phrase is not trusted and produces no finding.
pub struct TerminologyMismatch;

impl Detector for TerminologyMismatch {
    fn name(&self) -> &'static str {
        "terminology-mismatch"
    }

    fn inspect(&self, ctx: RuleContext<'_>, row: &Row, working: &str) -> Option<Detection> {
        let hit = ctx.terminology.standard_for(
            row.lookup_key_str(),
            &row.source,
            ctx.options.max_source_chars,
        )?;
        let standard = normalize_fullwidth(hit.standard);
        if standard.trim().is_empty() {
            return None;
        }
        if ctx.rules.mentions_forbidden(&standard) {
            tracing::debug!(key = hit.key, %standard, "standard mentions a forbidden term; skipped");
            return None;
        }

        let expected = normalize_for_compare(&standard);
        if normalize_for_compare(working) == expected
            || normalize_for_compare(&row.target) == expected
        {
            return None;
        }

        let detail = format!("{}: \"{}\" should be \"{standard}\"", hit.key, working.trim());
        Some(Detection::repair(
            FindingKind::TerminologyMismatch,
            standard,
            detail,
        ))
    }
}
