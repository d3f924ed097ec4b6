//! Cross-row consistency: identical source text should get identical
//! translations.

use indexmap::IndexMap;
use loqa_core::fullwidth::normalize_fullwidth;
use loqa_core::script::has_reference_script;
use loqa_core::{Finding, FindingKind, Row, TerminologyTables};

use crate::rules::RuleSet;

/// An `INCONSISTENCY` finding and the row it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inconsistency<'a> {
    pub row: &'a Row,
    pub finding: Finding,
}

/// Where a group's standard came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardOrigin {
    Terminology,
    Majority,
}

/// A row and the value its own detector fold converges on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRow<'a> {
    pub row: &'a Row,
    pub resolved: &'a str,
}

/// Rows sharing one source text.
#[derive(Debug, Default)]
struct SourceGroup<'a> {
    members: Vec<ResolvedRow<'a>>,
}

impl<'a> SourceGroup<'a> {
    /// Distinct trimmed targets, in first-seen order.
    fn variants(&self) -> IndexMap<&'a str, Vec<&'a Row>> {
        let mut variants: IndexMap<&'a str, Vec<&'a Row>> = IndexMap::new();
        for member in &self.members {
            variants
                .entry(member.row.target.trim())
                .or_default()
                .push(member.row);
        }
        variants
    }

    /// Most frequent resolved value; the first seen wins a tie.
    ///
    /// Each row votes with the value its own fixes produce, so a variant the
    /// rules or cosmetic checks would rewrite counts toward its rewrite.
    fn majority(&self) -> Option<&'a str> {
        let mut votes: IndexMap<&'a str, usize> = IndexMap::new();
        for member in &self.members {
            *votes.entry(member.resolved.trim()).or_default() += 1;
        }

        let mut best: Option<(&'a str, usize)> = None;
        for (&value, &count) in &votes {
            if value.is_empty() {
                continue;
            }
            if best.is_none_or(|(_, most)| count > most) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }
}

/// Pick the standard for a group: the terminology value when one exists and
/// is free of forbidden phrases, otherwise the majority resolved value.
fn choose_standard(
    source: &str,
    group: &SourceGroup<'_>,
    terminology: &TerminologyTables,
    rules: &RuleSet,
) -> Option<(String, StandardOrigin)> {
    let from_tables = terminology
        .standard_for_source(source)
        .map(normalize_fullwidth)
        .filter(|standard| !standard.trim().is_empty() && !rules.mentions_forbidden(standard));

    match from_tables {
        Some(standard) => Some((standard, StandardOrigin::Terminology)),
        None => group
            .majority()
            .map(|value| (value.to_string(), StandardOrigin::Majority)),
    }
}

/// Group rows by exact source text and flag every row whose target differs
/// (ignoring case) from the group's standard.
///
/// Only rows with a non-blank target and a source containing reference
/// script participate. Groups and rows are reported in first-seen order.
#[must_use]
pub fn check_consistency<'a>(
    rows: &[ResolvedRow<'a>],
    terminology: &TerminologyTables,
    rules: &RuleSet,
) -> Vec<Inconsistency<'a>> {
    let mut groups: IndexMap<&'a str, SourceGroup<'a>> = IndexMap::new();
    for &member in rows {
        let row = member.row;
        if row.source.is_empty() || row.target.trim().is_empty() || !has_reference_script(&row.source)
        {
            continue;
        }
        groups
            .entry(row.source.as_str())
            .or_default()
            .members
            .push(member);
    }

    let mut found = Vec::new();
    for (source, group) in &groups {
        let variants = group.variants();
        if variants.len() < 2 {
            continue;
        }
        let Some((standard, origin)) = choose_standard(source, group, terminology, rules) else {
            continue;
        };
        tracing::debug!(
            source,
            variants = variants.len(),
            %standard,
            ?origin,
            "inconsistent group"
        );

        let wanted = standard.to_lowercase();
        let detail = format!(
            "{} translations of \"{source}\"; standard is \"{standard}\"",
            variants.len()
        );
        for (variant, members) in &variants {
            if variant.to_lowercase() == wanted {
                continue;
            }
            for &row in members {
                found.push(Inconsistency {
                    row,
                    finding: Finding::new(
                        FindingKind::Inconsistency,
                        row.target.as_str(),
                        Some(standard.clone()),
                        detail.clone(),
                    ),
                });
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::{DetectorSet, EngineOptions, RuleContext};
    use crate::resolver::resolve_row;
    use pretty_assertions::assert_eq;

    fn row(id: &str, source: &str, target: &str) -> Row {
        Row::new("APP", id, source, target)
    }

    fn check(rows: &[Row], terminology: &TerminologyTables, rules: &RuleSet) -> Vec<(String, String)> {
        let options = EngineOptions::default();
        let ctx = RuleContext {
            terminology,
            rules,
            options: &options,
        };
        let detectors = DetectorSet::standard();
        let resolved: Vec<String> = rows
            .iter()
            .map(|row| resolve_row(&detectors, ctx, row).resolved)
            .collect();
        let members: Vec<ResolvedRow<'_>> = rows
            .iter()
            .zip(&resolved)
            .map(|(row, resolved)| ResolvedRow { row, resolved })
            .collect();
        check_consistency(&members, terminology, rules)
            .into_iter()
            .map(|hit| (hit.row.row_id.clone(), hit.finding.suggestion))
            .collect()
    }

    fn flagged(rows: &[Row], terminology: &TerminologyTables) -> Vec<(String, String)> {
        check(rows, terminology, &RuleSet::default())
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(id, value)| ((*id).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn majority_variant_becomes_the_standard() {
        let rows = vec![
            row("1", "充值", "Nạp"),
            row("2", "充值", "Nạp tiền"),
            row("3", "充值", "Nạp tiền"),
        ];
        assert_eq!(
            flagged(&rows, &TerminologyTables::default()),
            pairs(&[("1", "Nạp tiền")])
        );
    }

    #[test]
    fn ties_go_to_the_first_seen_variant() {
        let rows = vec![row("1", "充值", "Nạp tiền"), row("2", "充值", "Nạp")];
        let members: Vec<ResolvedRow<'_>> = rows
            .iter()
            .map(|row| ResolvedRow {
                row,
                resolved: row.target.as_str(),
            })
            .collect();
        let hits = check_consistency(&members, &TerminologyTables::default(), &RuleSet::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].row.row_id, "2");
        assert_eq!(hits[0].finding.suggestion, "Nạp tiền");
        assert_eq!(
            hits[0].finding.detail,
            "2 translations of \"充值\"; standard is \"Nạp tiền\""
        );
    }

    #[test]
    fn without_rules_a_tie_keeps_the_first_seen_text() {
        let rows = vec![row("1", "返佣", "Giảm giá"), row("2", "返佣", "Hoàn phí")];
        assert_eq!(
            check(&rows, &TerminologyTables::default(), &RuleSet::new(Vec::new())),
            pairs(&[("2", "Giảm giá")])
        );
    }

    #[test]
    fn rule_rewrites_vote_for_their_replacement() {
        let rows = vec![row("1", "返佣", "Giảm giá"), row("2", "返佣", "Hoàn phí")];
        assert_eq!(
            flagged(&rows, &TerminologyTables::default()),
            pairs(&[("1", "Hoàn phí")])
        );
    }

    #[test]
    fn a_rewritten_majority_still_outvotes_a_single_variant() {
        let mut rows: Vec<Row> = (1..=10)
            .map(|id| row(&id.to_string(), "充值", "nạp tiền"))
            .collect();
        rows.push(row("11", "充值", "Nạp"));
        assert_eq!(
            flagged(&rows, &TerminologyTables::default()),
            pairs(&[("11", "Nạp tiền")])
        );
    }

    #[test]
    fn standard_carries_the_cosmetic_fixes() {
        let rows = vec![row("1", "充值", "nạp tiền  "), row("2", "充值", "Nạp")];
        assert_eq!(
            flagged(&rows, &TerminologyTables::default()),
            pairs(&[("2", "Nạp tiền")])
        );
    }

    #[test]
    fn terminology_standard_wins_over_majority() {
        let mut tables = TerminologyTables::default();
        tables.overrides.insert("现货".into(), "Spot（现货）".into());
        tables.terms.insert("现货".into(), "Giao ngay".into());
        let rows = vec![
            row("1", "现货", "Giao ngay"),
            row("2", "现货", "Giao ngay"),
            row("3", "现货", "Spot(现货)"),
        ];
        assert_eq!(
            flagged(&rows, &tables),
            pairs(&[("1", "Spot(现货)"), ("2", "Spot(现货)")])
        );
    }

    #[test]
    fn forbidden_terminology_falls_back_to_majority() {
        let mut tables = TerminologyTables::default();
        tables.terms.insert("返佣".into(), "Giảm giá".into());
        let rows = vec![
            row("1", "返佣", "Hoàn phí"),
            row("2", "返佣", "Giảm giá"),
            row("3", "返佣", "Hoàn phí"),
        ];
        assert_eq!(flagged(&rows, &tables), pairs(&[("2", "Hoàn phí")]));
    }

    #[test]
    fn case_only_differences_are_not_flagged() {
        let rows = vec![
            row("1", "现货", "Spot"),
            row("2", "现货", "spot"),
            row("3", "现货", "Spot"),
        ];
        assert!(flagged(&rows, &TerminologyTables::default()).is_empty());
    }

    #[test]
    fn rows_without_reference_source_or_target_are_ignored() {
        let rows = vec![
            row("1", "USDT", "USDT"),
            row("2", "USDT", "Tether"),
            row("3", "合约", ""),
            row("4", "合约", "Futures"),
        ];
        assert!(flagged(&rows, &TerminologyTables::default()).is_empty());
    }
}
