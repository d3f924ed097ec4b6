//! Presence checks. Both short-circuit the rest of the battery.

use loqa_core::script::has_reference_script;
use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};

/// Blank target for a non-blank source.
pub struct EmptyTarget;

impl Detector for EmptyTarget {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, row: &Row, working: &str) -> Option<Detection> {
        (working.trim().is_empty() && !row.source.is_empty())
            .then(|| Detection::flag(FindingKind::Empty, "target is empty"))
    }
}

/// Target copied verbatim from a source that still holds reference script.
pub struct UntranslatedCopy;

impl Detector for UntranslatedCopy {
    fn name(&self) -> &'static str {
        "untranslated-copy"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, row: &Row, working: &str) -> Option<Detection> {
        (working.trim() == row.source && has_reference_script(&row.source)).then(|| {
            Detection::flag(
                FindingKind::UntranslatedCopy,
                "target is a verbatim copy of the source",
            )
        })
    }
}
