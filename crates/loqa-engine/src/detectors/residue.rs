//! Leftover reference-script text in the target.

use loqa_core::script::{has_reference_script, reference_chars, reference_ratio};
use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};

/// At or above this share of reference-script characters the target is
/// treated as untranslated rather than as carrying fragments.
const UNTRANSLATED_RATIO: f64 = 0.5;

/// Reports `CONTAINS_CHINESE` for mostly-untranslated targets and
/// `CHINESE_FRAGMENT` for targets with a few leftover characters, repairing
/// the latter through the fragment table where possible.
pub struct ReferenceResidue;

impl Detector for ReferenceResidue {
    fn name(&self) -> &'static str {
        "reference-residue"
    }

    fn inspect(&self, ctx: RuleContext<'_>, row: &Row, working: &str) -> Option<Detection> {
        if !has_reference_script(&row.source) || !has_reference_script(working) {
            return None;
        }

        let ratio = reference_ratio(working.trim());
        if ratio >= UNTRANSLATED_RATIO {
            return Some(Detection::flag(
                FindingKind::ContainsChinese,
                format!("reference script makes up {:.0}% of the target", ratio * 100.0),
            ));
        }

        let residue = reference_chars(working);
        let mut repaired = working.to_string();
        let mut matched = false;
        for (fragment, replacement) in &ctx.terminology.fragments {
            if fragment.is_empty() || !repaired.contains(fragment.as_str()) {
                continue;
            }
            repaired = repaired.replace(fragment.as_str(), replacement);
            matched = true;
        }

        if !matched {
            return Some(Detection::flag(
                FindingKind::ChineseFragment,
                format!("untranslated fragment: {residue}"),
            ));
        }

        let remaining = reference_chars(&repaired);
        let detail = if remaining.is_empty() {
            format!("fragment replaced: {residue}")
        } else {
            format!("untranslated fragment: {remaining}")
        };
        Some(Detection::repair(FindingKind::ChineseFragment, repaired, detail))
    }
}
