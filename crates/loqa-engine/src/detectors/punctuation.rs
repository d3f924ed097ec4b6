use loqa_core::fullwidth::{has_fullwidth, normalize_fullwidth};
use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};

/// Full-width punctuation in the target.
pub struct FullwidthPunctuation;

impl Detector for FullwidthPunctuation {
    fn name(&self) -> &'static str {
        "fullwidth-punctuation"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, _row: &Row, working: &str) -> Option<Detection> {
        if !has_fullwidth(working) {
            return None;
        }
        Some(Detection::repair(
            FindingKind::FullwidthPunctuation,
            normalize_fullwidth(working),
            "full-width punctuation",
        ))
    }
}
