//! Scan, fix, and verify as one cycle: fixed-point and safety properties.

use loqa_core::fullwidth::has_fullwidth;
use loqa_core::{ColumnSpec, RowTable};
use loqa_engine::{
    AuditScope, Engine, EntropySampler, FixPlan, Verdict, apply_fixes, audit_structure,
    evaluate_gates,
};
use pretty_assertions::assert_eq;

const TARGET: &str = "越语";
const ROW_ID: &str = "编号ID";

fn columns() -> ColumnSpec {
    ColumnSpec {
        target: TARGET.into(),
        source: "简体中文".into(),
        context_key: Some("语言标识".into()),
        row_id: ROW_ID.into(),
    }
}

fn fixture() -> RowTable {
    let rows = [
        ("1", "合约账户", "Tài khoản Hợp đồng"),
        ("2", "返佣", "Giảm giá"),
        ("3", "返佣", "Hoàn phí"),
        ("4", "充值", "nạp tiền  "),
        ("5", "充值", "Nạp tiền"),
        ("6", "测试", "，test．"),
        ("7", "资产", "Tài sản"),
        ("8", "充值", "Nạp"),
        ("9", "提现", "Rút tiền（nhanh）"),
    ];
    RowTable::new(
        "APP",
        vec![
            ROW_ID.into(),
            "简体中文".into(),
            TARGET.into(),
            "语言标识".into(),
            "备注".into(),
        ],
        rows.iter()
            .map(|(id, source, target)| {
                vec![
                    (*id).to_string(),
                    (*source).to_string(),
                    (*target).to_string(),
                    format!("key_{id}"),
                    format!("note {id}"),
                ]
            })
            .collect(),
    )
}

fn targets(table: &RowTable) -> Vec<String> {
    let column = table.column_index(TARGET).unwrap();
    (0..table.row_count())
        .map(|row| table.cell(row, column).to_string())
        .collect()
}

fn fix_once(engine: &Engine, table: &mut RowTable) -> usize {
    let report = engine.scan([&*table], &columns());
    let plan = FixPlan::from_worklist(&report.worklist, false);
    apply_fixes(table, TARGET, ROW_ID, &plan).unwrap().modified
}

#[test]
fn fix_pass_applies_resolved_values() {
    let engine = Engine::default();
    let mut table = fixture();
    fix_once(&engine, &mut table);

    assert_eq!(
        targets(&table),
        vec![
            "Tài khoản Futures",
            "Hoàn phí",
            "Hoàn phí",
            "Nạp tiền",
            "Nạp tiền",
            ",test.",
            "Tài sản",
            "Nạp tiền",
            "Rút tiền(nhanh)",
        ]
    );
}

#[test]
fn reapplying_the_same_worklist_changes_nothing() {
    let engine = Engine::default();
    let mut table = fixture();
    let report = engine.scan([&table], &columns());
    let plan = FixPlan::from_worklist(&report.worklist, false);

    let first = apply_fixes(&mut table, TARGET, ROW_ID, &plan).unwrap();
    assert!(first.modified > 0);
    let after_first = table.clone();

    let second = apply_fixes(&mut table, TARGET, ROW_ID, &plan).unwrap();
    assert_eq!(second.modified, 0);
    assert_eq!(table, after_first);
}

#[test]
fn a_second_fix_pass_finds_nothing_to_change() {
    let engine = Engine::default();
    let mut table = fixture();
    assert!(fix_once(&engine, &mut table) > 0);
    let fixed = table.clone();

    let rescan = engine.scan([&table], &columns());
    let pending: Vec<_> = rescan
        .worklist
        .iter()
        .filter(|entry| !entry.suggestion.is_empty() && entry.suggestion != entry.current)
        .collect();
    assert!(pending.is_empty(), "{pending:?}");

    assert_eq!(fix_once(&engine, &mut table), 0);
    assert_eq!(table, fixed);
}

#[test]
fn lower_case_majority_still_settles_in_one_pass() {
    let engine = Engine::default();
    let mut rows: Vec<Vec<String>> = (1..=10)
        .map(|id| vec![id.to_string(), "充值".into(), "nạp tiền".into()])
        .collect();
    rows.push(vec!["11".into(), "充值".into(), "Nạp".into()]);
    let mut table = RowTable::new(
        "APP",
        vec![ROW_ID.into(), "简体中文".into(), TARGET.into()],
        rows,
    );

    fix_once(&engine, &mut table);
    assert!(targets(&table).iter().all(|target| target == "Nạp tiền"));
    assert_eq!(fix_once(&engine, &mut table), 0);
}

#[test]
fn fix_pass_keeps_structure_intact() {
    let engine = Engine::default();
    let before = fixture();
    let mut after = before.clone();
    fix_once(&engine, &mut after);

    assert_eq!(after.row_count(), before.row_count());
    assert_eq!(after.headers, before.headers);
    assert_eq!(after.row_ids(ROW_ID), before.row_ids(ROW_ID));
    for column in 0..before.column_count() {
        if before.headers[column] == TARGET {
            continue;
        }
        for row in 0..before.row_count() {
            assert_eq!(after.cell(row, column), before.cell(row, column));
        }
    }

    let audit = audit_structure(
        &before,
        &after,
        TARGET,
        ROW_ID,
        AuditScope::Sample(4),
        &mut EntropySampler,
    );
    assert!(audit.passed(), "{:?}", audit.violations);
}

#[test]
fn no_full_width_punctuation_survives_a_fix_pass() {
    let engine = Engine::default();
    let mut table = fixture();
    // An empty plan still normalizes every row.
    apply_fixes(&mut table, TARGET, ROW_ID, &FixPlan::default()).unwrap();
    assert!(targets(&table).iter().all(|target| !has_fullwidth(target)));

    let mut table = fixture();
    fix_once(&engine, &mut table);
    assert!(targets(&table).iter().all(|target| !has_fullwidth(target)));
}

#[test]
fn shared_sources_agree_after_a_fix_pass() {
    let engine = Engine::default();
    let mut table = fixture();
    fix_once(&engine, &mut table);

    let targets = targets(&table);
    let lowered = |index: usize| targets[index].to_lowercase();
    assert_eq!(lowered(1), lowered(2));
    assert_eq!(lowered(3), lowered(4));
    assert_eq!(lowered(3), lowered(7));
}

#[test]
fn verification_passes_after_fixing() {
    let engine = Engine::default();
    let before = fixture();
    let mut after = before.clone();
    fix_once(&engine, &mut after);

    let audit = audit_structure(
        &before,
        &after,
        TARGET,
        ROW_ID,
        AuditScope::Full,
        &mut EntropySampler,
    );
    let rescan = engine.scan([&after], &columns());
    let verification = evaluate_gates(&rescan, vec![audit]);
    assert_eq!(verification.verdict, Verdict::Safe);

    let unfixed = engine.scan([&before], &columns());
    assert_eq!(evaluate_gates(&unfixed, Vec::new()).verdict, Verdict::NotSafe);
}
