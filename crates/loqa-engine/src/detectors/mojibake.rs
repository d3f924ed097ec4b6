//! Double-encoding artifacts.

use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};

/// Byte sequences left behind when UTF-8 text is decoded as Latin-1 and
/// re-encoded.
const SIGNATURES: &[&str] = &[
    "Ã¡", "Ã©", "Ã³", "â€", "áº", "á»", "Ã¢", "Ã´", "Æ°", "Ä",
];

#[must_use]
pub fn has_mojibake(text: &str) -> bool {
    SIGNATURES.iter().any(|signature| text.contains(signature))
}

pub struct Mojibake;

impl Detector for Mojibake {
    fn name(&self) -> &'static str {
        "mojibake"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, _row: &Row, working: &str) -> Option<Detection> {
        has_mojibake(working).then(|| Detection::flag(FindingKind::Mojibake, "encoding corruption"))
    }
}
