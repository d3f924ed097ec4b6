use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};
use crate::text::collapse_spaces;

/// Leading or trailing blanks and doubled spaces.
pub struct Whitespace;

impl Detector for Whitespace {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, _row: &Row, working: &str) -> Option<Detection> {
        if working.trim().is_empty() {
            return None;
        }
        let fixed = collapse_spaces(working);
        (fixed != working).then(|| {
            Detection::repair(
                FindingKind::Whitespace,
                fixed,
                "leading, trailing or repeated blanks",
            )
        })
    }
}
