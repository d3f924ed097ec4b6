//! Reference-script (CJK ideograph) detection.
//!
//! The reference script is the source language's script. Any of its
//! characters left in a target string are untranslated residue.

/// Whether `c` belongs to the reference script (CJK Unified Ideographs and
/// Extension A).
#[must_use]
pub const fn is_reference_char(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}')
}

#[must_use]
pub fn has_reference_script(text: &str) -> bool {
    text.chars().any(is_reference_char)
}

/// Reference-script characters of `text`, in order of appearance.
#[must_use]
pub fn reference_chars(text: &str) -> String {
    text.chars().filter(|c| is_reference_char(*c)).collect()
}

/// Fraction of characters in `text` that belong to the reference script.
///
/// Returns `0.0` for empty text.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reference_ratio(text: &str) -> f64 {
    let (reference, total) = text.chars().fold((0usize, 0usize), |(reference, total), c| {
        (reference + usize::from(is_reference_char(c)), total + 1)
    });
    if total == 0 {
        return 0.0;
    }
    reference as f64 / total as f64
}
