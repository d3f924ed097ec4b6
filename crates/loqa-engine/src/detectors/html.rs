//! Markup balance check.

use std::sync::LazyLock;

use loqa_core::{FindingKind, Row};
use regex::Regex;

use super::{Detection, Detector, RuleContext};

static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z]+)[^>]*>").expect("open tag pattern"));
static CLOSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</([a-zA-Z]+)>").expect("close tag pattern"));

const SELF_CLOSING: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Whether a `<br` at the start of `rest` is closed properly: by `>`, `/>`,
/// or a following blank.
fn br_is_terminated(rest: &str) -> bool {
    let after = &rest["<br".len()..];
    after.starts_with('>')
        || after.starts_with("/>")
        || after.chars().next().is_some_and(char::is_whitespace)
}

/// Unbalanced opening/closing tags, or a line-break tag cut off.
///
/// Self-closing tags (`<br>`, `<img/>`, anything ending in `/>`) are not
/// counted as openings.
#[must_use]
pub fn has_broken_html(text: &str) -> bool {
    let opened = OPEN_TAG
        .captures_iter(text)
        .filter(|caps| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
            !whole.ends_with("/>") && !SELF_CLOSING.contains(&name.as_str())
        })
        .count();
    let closed = CLOSE_TAG.captures_iter(text).count();
    if opened != closed {
        return true;
    }

    text.match_indices("<br")
        .any(|(start, _)| !br_is_terminated(&text[start..]))
}

pub struct BrokenHtml;

impl Detector for BrokenHtml {
    fn name(&self) -> &'static str {
        "broken-html"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, _row: &Row, working: &str) -> Option<Detection> {
        has_broken_html(working)
            .then(|| Detection::flag(FindingKind::BrokenHtml, "unbalanced or truncated markup"))
    }
}
