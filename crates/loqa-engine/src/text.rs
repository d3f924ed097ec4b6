//! Case-insensitive matching and comparison helpers.

use std::ops::Range;

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte range of the leftmost case-insensitive occurrence of `needle`.
///
/// Matching is per character, so the returned range always lies on char
/// boundaries of `haystack` even when case mapping changes byte lengths.
#[must_use]
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return Some(0..0);
    }

    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut end = start;
        let matched = needle.chars().all(|wanted| match rest.next() {
            Some((offset, found)) if chars_eq_ignore_case(found, wanted) => {
                end = start + offset + found.len_utf8();
                true
            }
            _ => false,
        });
        if matched {
            return Some(start..end);
        }
    }
    None
}

#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Comparison form: trimmed, lower-cased, whitespace runs collapsed.
#[must_use]
pub fn normalize_for_compare(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim and collapse each run of two or more blanks into one space.
///
/// A blank is any whitespace other than a line break, so tabs and
/// no-break spaces count. A lone blank is kept as written.
#[must_use]
pub fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for c in text.trim().chars() {
        if c.is_whitespace() && c != '\n' && c != '\r' {
            run.push(c);
            continue;
        }
        flush_blank_run(&mut out, &mut run);
        out.push(c);
    }
    out
}

fn flush_blank_run(out: &mut String, run: &mut String) {
    if run.chars().nth(1).is_some() {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}
