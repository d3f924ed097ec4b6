//! Per-row resolution: run the detector battery as a fold over the target.

use loqa_core::{Finding, FindingKind, Row};

use crate::detectors::{DetectorSet, RuleContext};

/// Findings for one row and the value the row converges on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResolution {
    pub findings: Vec<Finding>,
    /// Target after every proposed rewrite has been applied.
    pub resolved: String,
}

impl RowResolution {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether any kind in `kinds` was reported.
    #[must_use]
    pub fn has_any(&self, kinds: &[FindingKind]) -> bool {
        self.findings.iter().any(|finding| kinds.contains(&finding.kind))
    }
}

/// Run every detector over `row` in order.
///
/// Each detector sees the working value left by the ones before it. A
/// detection with a non-empty rewrite records it as its finding's
/// `contribution` and moves the working value forward. A short-circuiting
/// detection stops the battery.
///
/// When the final value differs from the original target, every finding
/// except `TERMINOLOGY_MISMATCH` suggests that final value, so applying the
/// suggestion of any finding on the row converges on one string.
#[must_use]
pub fn resolve_row(detectors: &DetectorSet, ctx: RuleContext<'_>, row: &Row) -> RowResolution {
    let mut findings = Vec::new();
    let mut working = row.target.clone();

    for detector in detectors.iter() {
        let Some(detection) = detector.inspect(ctx, row, &working) else {
            continue;
        };
        let kind = detection.kind;
        let contribution = detection.rewrite.filter(|text| !text.is_empty());
        if let Some(text) = &contribution {
            working.clone_from(text);
        }
        findings.push(Finding::new(kind, row.target.as_str(), contribution, detection.detail));

        if kind.short_circuits() {
            tracing::trace!(
                table = %row.table,
                row_id = %row.row_id,
                detector = detector.name(),
                "short-circuit"
            );
            break;
        }
    }

    if working != row.target {
        for finding in &mut findings {
            if finding.kind != FindingKind::TerminologyMismatch {
                finding.suggestion.clone_from(&working);
            }
        }
    }

    RowResolution {
        findings,
        resolved: working,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::Fixture;
    use pretty_assertions::assert_eq;

    fn resolve(fixture: &Fixture, source: &str, target: &str) -> RowResolution {
        let row = Row::new("APP", "7", source, target);
        resolve_row(&DetectorSet::standard(), fixture.ctx(), &row)
    }

    fn kinds(resolution: &RowResolution) -> Vec<FindingKind> {
        resolution.findings.iter().map(|finding| finding.kind).collect()
    }

    #[test]
    fn empty_target_short_circuits() {
        let resolution = resolve(&Fixture::new(), "合约", "  ");
        assert_eq!(kinds(&resolution), vec![FindingKind::Empty]);
        assert_eq!(resolution.findings[0].suggestion, "");
    }

    #[test]
    fn untranslated_copy_short_circuits() {
        let resolution = resolve(&Fixture::new(), "合约账户", "合约账户");
        assert_eq!(kinds(&resolution), vec![FindingKind::UntranslatedCopy]);
    }

    #[test]
    fn clean_rows_have_no_findings() {
        let resolution = resolve(&Fixture::new(), "合约账户", "Tài khoản Futures");
        assert!(resolution.is_clean());
        assert_eq!(resolution.resolved, "Tài khoản Futures");
    }

    #[test]
    fn rewrites_chain_and_every_suggestion_converges() {
        let resolution = resolve(&Fixture::new(), "合约账户", " tài khoản Hợp đồng，");
        assert_eq!(
            kinds(&resolution),
            vec![
                FindingKind::FullwidthPunctuation,
                FindingKind::WrongTerm,
                FindingKind::Whitespace,
            ]
        );
        assert_eq!(resolution.resolved, "Tài khoản Futures,");

        let contributions: Vec<_> = resolution
            .findings
            .iter()
            .map(|finding| finding.contribution.as_deref())
            .collect();
        assert_eq!(
            contributions,
            vec![
                Some(" tài khoản Hợp đồng,"),
                Some(" Tài khoản Futures,"),
                Some("Tài khoản Futures,"),
            ]
        );
        assert!(
            resolution
                .findings
                .iter()
                .all(|finding| finding.suggestion == "Tài khoản Futures,"
                    && finding.current == " tài khoản Hợp đồng，")
        );
    }

    #[test]
    fn flag_only_findings_still_suggest_the_resolved_value() {
        let mut fixture = Fixture::new();
        fixture
            .terminology
            .fragments
            .insert("合约".into(), "Futures".into());
        let resolution = resolve(&fixture, "合约账户", "tài khoản 合约<b>");
        assert_eq!(
            kinds(&resolution),
            vec![
                FindingKind::ChineseFragment,
                FindingKind::Capitalization,
                FindingKind::BrokenHtml,
            ]
        );
        let html = &resolution.findings[2];
        assert_eq!(html.contribution, None);
        assert_eq!(html.suggestion, "Tài khoản Futures<b>");
    }

    #[test]
    fn terminology_mismatch_keeps_the_standard() {
        let mut fixture = Fixture::new();
        fixture.terminology.terms.insert("现货".into(), "spot".into());
        let resolution = resolve(&fixture, "现货", "giao dịch");
        assert_eq!(
            kinds(&resolution),
            vec![FindingKind::TerminologyMismatch, FindingKind::Capitalization]
        );
        assert_eq!(resolution.findings[0].suggestion, "spot");
        assert_eq!(resolution.findings[1].suggestion, "Spot");
        assert_eq!(resolution.resolved, "Spot");
    }
}
