use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};

/// Forbidden or deprecated terms, rewritten by the context-gated rule set.
pub struct WrongTerm;

impl Detector for WrongTerm {
    fn name(&self) -> &'static str {
        "wrong-term"
    }

    fn inspect(&self, ctx: RuleContext<'_>, row: &Row, working: &str) -> Option<Detection> {
        let rewrite = ctx.rules.apply(working, &row.source)?;
        Some(Detection::repair(
            FindingKind::WrongTerm,
            rewrite.text,
            rewrite.hits.join("; "),
        ))
    }
}
