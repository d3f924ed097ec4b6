use loqa_core::{FindingKind, Row};

use super::{Detection, Detector, RuleContext};

/// Sentence-initial lower-case letter.
pub struct Capitalization;

impl Detector for Capitalization {
    fn name(&self) -> &'static str {
        "capitalization"
    }

    fn inspect(&self, _ctx: RuleContext<'_>, _row: &Row, working: &str) -> Option<Detection> {
        let trimmed = working.trim();
        let mut chars = trimmed.chars();
        let first = chars.next()?;
        if !first.is_alphabetic() || !first.is_lowercase() {
            return None;
        }

        let fixed: String = first.to_uppercase().chain(chars).collect();
        (fixed != trimmed).then(|| {
            Detection::repair(
                FindingKind::Capitalization,
                fixed,
                "first letter should be upper case",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::Fixture;
    use rstest::rstest;

    #[rstest]
    #[case("tài khoản", Some("Tài khoản"))]
    #[case("đơn vị", Some("Đơn vị"))]
    #[case("Tài khoản", None)]
    #[case("24 giờ", None)]
    #[case("(ghi chú)", None)]
    #[case("", None)]
    fn upper_cases_the_first_letter(#[case] target: &str, #[case] expected: Option<&str>) {
        let detection = Fixture::new().inspect(&Capitalization, "账户", target);
        assert_eq!(detection.and_then(|d| d.rewrite).as_deref(), expected);
    }
}
