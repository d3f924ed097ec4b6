//! End-to-end detection scenarios over in-memory tables.

use loqa_core::{ColumnSpec, FindingKind, Priority, RowTable, TerminologyTables, WorklistEntry};
use loqa_engine::{Engine, RuleSet};
use pretty_assertions::assert_eq;

fn columns() -> ColumnSpec {
    ColumnSpec {
        target: "越语".into(),
        source: "简体中文".into(),
        context_key: Some("语言标识".into()),
        row_id: "编号ID".into(),
    }
}

fn table(label: &str, rows: &[(&str, &str, &str)]) -> RowTable {
    RowTable::new(
        label,
        vec!["编号ID".into(), "简体中文".into(), "越语".into(), "语言标识".into()],
        rows.iter()
            .map(|(id, source, target)| {
                vec![
                    (*id).to_string(),
                    (*source).to_string(),
                    (*target).to_string(),
                    format!("key_{id}"),
                ]
            })
            .collect(),
    )
}

fn kinds_for(worklist: &[WorklistEntry], row_id: &str) -> Vec<FindingKind> {
    worklist
        .iter()
        .filter(|entry| entry.row_id == row_id)
        .map(|entry| entry.kind)
        .collect()
}

#[test]
fn blank_target_yields_only_empty() {
    let table = table("APP", &[("1", "合约账户", "   ")]);
    let report = Engine::default().scan([&table], &columns());
    assert_eq!(kinds_for(&report.worklist, "1"), vec![FindingKind::Empty]);
    assert_eq!(report.worklist[0].priority, Priority::P0);
}

#[test]
fn untranslated_copy_is_reported_once() {
    let table = table("APP", &[("10", "合约账户", "合约账户")]);
    let report = Engine::default().scan([&table], &columns());
    assert_eq!(report.worklist.len(), 1);
    let entry = &report.worklist[0];
    assert_eq!(entry.kind, FindingKind::UntranslatedCopy);
    assert_eq!(entry.priority, Priority::P0);
    assert_eq!(entry.row_id, "10");
    assert_eq!(entry.seq, 1);
}

#[test]
fn contract_account_is_a_wrong_term() {
    let table = table("APP", &[("3", "合约账户", "Tài khoản Hợp đồng")]);
    let report = Engine::default().scan([&table], &columns());
    assert_eq!(kinds_for(&report.worklist, "3"), vec![FindingKind::WrongTerm]);
    assert_eq!(report.worklist[0].suggestion, "Tài khoản Futures");
    assert_eq!(report.worklist[0].context_key, "key_3");
}

#[test]
fn full_width_punctuation_is_normalized() {
    let table = table("APP", &[("4", "测试", "，test．")]);
    let report = Engine::default().scan([&table], &columns());
    assert_eq!(
        kinds_for(&report.worklist, "4"),
        vec![FindingKind::FullwidthPunctuation]
    );
    assert_eq!(report.worklist[0].suggestion, ",test.");
}

#[test]
fn rule_rewrites_decide_which_variant_is_standard() {
    let app = table("APP", &[("1", "返佣", "Giảm giá")]);
    let h5 = table("H5", &[("1", "返佣", "Hoàn phí")]);
    let report = Engine::default().scan([&app, &h5], &columns());

    let inconsistent: Vec<_> = report
        .worklist
        .iter()
        .filter(|entry| entry.kind == FindingKind::Inconsistency)
        .map(|entry| (entry.table.as_str(), entry.suggestion.as_str(), entry.context_key.as_str()))
        .collect();
    assert_eq!(inconsistent, vec![("APP", "Hoàn phí", "返佣")]);

    let wrong_term = report
        .worklist
        .iter()
        .find(|entry| entry.kind == FindingKind::WrongTerm)
        .unwrap();
    assert_eq!(wrong_term.suggestion, "Hoàn phí");
}

#[test]
fn without_rules_the_first_seen_variant_is_standard() {
    let app = table("APP", &[("1", "返佣", "Giảm giá")]);
    let h5 = table("H5", &[("1", "返佣", "Hoàn phí")]);
    let report = Engine::default()
        .with_rules(RuleSet::new(Vec::new()))
        .scan([&app, &h5], &columns());

    let inconsistent: Vec<_> = report
        .worklist
        .iter()
        .filter(|entry| entry.kind == FindingKind::Inconsistency)
        .map(|entry| (entry.table.as_str(), entry.suggestion.as_str()))
        .collect();
    assert_eq!(inconsistent, vec![("H5", "Giảm giá")]);
}

#[test]
fn tied_variants_pick_the_first_seen_every_time() {
    let rows = [("1", "充值", "Nạp"), ("2", "充值", "Nạp tiền")];
    for _ in 0..3 {
        let report = Engine::default().scan([&table("APP", &rows)], &columns());
        let entry = report
            .worklist
            .iter()
            .find(|entry| entry.kind == FindingKind::Inconsistency)
            .unwrap();
        assert_eq!(entry.row_id, "2");
        assert_eq!(entry.suggestion, "Nạp");
    }
}

#[test]
fn terminology_tables_drive_mismatch_findings() {
    let mut tables = TerminologyTables::default();
    tables.overrides.insert("资产".into(), "Tài sản".into());
    tables.terms.insert("key_2".into(), "Ký quỹ（Margin）".into());
    let table = table(
        "APP",
        &[("1", "资产", "Của cải"), ("2", "保证金说明", "Tiền đặt cọc")],
    );

    let report = Engine::new(tables).scan([&table], &columns());
    let mismatches: Vec<_> = report
        .worklist
        .iter()
        .filter(|entry| entry.kind == FindingKind::TerminologyMismatch)
        .map(|entry| (entry.row_id.as_str(), entry.suggestion.as_str()))
        .collect();
    assert_eq!(mismatches, vec![("2", "Ký quỹ(Margin)"), ("1", "Tài sản")]);
    assert_eq!(report.summary.terminology.overrides, 1);
    assert_eq!(report.summary.terminology.terms, 1);
}

#[test]
fn summary_counts_by_priority_kind_and_table() {
    let app = table("APP", &[("1", "合约", ""), ("2", "账户", " Tài khoản")]);
    let web = table("Web", &[("1", "测试", "test")]);
    let report = Engine::default().scan([&web, &app], &columns());

    let summary = &report.summary;
    assert_eq!(summary.tables, 2);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.findings, 3);
    assert_eq!(summary.count_priority(Priority::P0), 1);
    assert_eq!(summary.count_priority(Priority::P2), 2);
    assert_eq!(
        summary.by_kind.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["EMPTY", "WHITESPACE", "CAPITALIZATION"]
    );
    assert_eq!(
        summary.by_table.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["APP", "Web"]
    );
}
