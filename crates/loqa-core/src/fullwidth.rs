//! Full-width to half-width punctuation normalization.

/// Full-width punctuation and its half-width replacement.
pub const FULLWIDTH_MAP: &[(char, &str)] = &[
    ('，', ","),
    ('！', "!"),
    ('？', "?"),
    ('：', ":"),
    ('；', ";"),
    ('（', "("),
    ('）', ")"),
    ('【', "["),
    ('】', "]"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('～', "~"),
    ('…', "..."),
    ('—', "-"),
    ('、', ","),
    ('。', "."),
    ('．', "."),
    ('《', "<"),
    ('》', ">"),
    ('丨', "|"),
];

fn half_width(c: char) -> Option<&'static str> {
    FULLWIDTH_MAP
        .iter()
        .find_map(|(full, half)| (*full == c).then_some(*half))
}

#[must_use]
pub fn has_fullwidth(text: &str) -> bool {
    text.chars().any(|c| half_width(c).is_some())
}

/// Replace every full-width punctuation mark with its half-width form.
///
/// Idempotent: no replacement introduces a key of [`FULLWIDTH_MAP`].
#[must_use]
pub fn normalize_fullwidth(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match half_width(c) {
            Some(half) => out.push_str(half),
            None => out.push(c),
        }
    }
    out
}
