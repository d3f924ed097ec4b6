//! Applying a reviewed worklist back onto a row table.

use indexmap::IndexMap;
use indexmap::map::Entry;
use loqa_core::fullwidth::normalize_fullwidth;
use loqa_core::{CoreError, RowTable, WorklistEntry};
use serde::Serialize;

/// One replacement per `(table, row id)`, distilled from a worklist.
///
/// A manual fix beats the detector suggestion within an entry. Across
/// entries for the same row the longer replacement (in characters) wins;
/// on a tie the first entry read is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixPlan {
    fixes: IndexMap<(String, String), String>,
}

impl FixPlan {
    /// Build a plan. Entries without a row id are ignored, as are entries
    /// whose confirmation field is blank when `require_confirmation` is set.
    #[must_use]
    pub fn from_worklist<'a>(
        entries: impl IntoIterator<Item = &'a WorklistEntry>,
        require_confirmation: bool,
    ) -> Self {
        let mut fixes: IndexMap<(String, String), String> = IndexMap::new();
        for entry in entries {
            if require_confirmation && !entry.is_confirmed() {
                continue;
            }
            let row_id = entry.row_id.trim();
            if row_id.is_empty() {
                continue;
            }
            let Some(fix) = entry.effective_fix() else {
                continue;
            };
            let key = (entry.table.trim().to_string(), row_id.to_string());
            match fixes.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(fix.to_string());
                }
                Entry::Occupied(mut slot) => {
                    if fix.chars().count() > slot.get().chars().count() {
                        slot.insert(fix.to_string());
                    }
                }
            }
        }
        Self { fixes }
    }

    #[must_use]
    pub fn fix_for(&self, table: &str, row_id: &str) -> Option<&str> {
        self.fixes
            .get(&(table.to_string(), row_id.to_string()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

/// What a fix pass did to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableFixReport {
    pub table: String,
    pub rows: usize,
    /// Rows the plan had a replacement for.
    pub planned: usize,
    /// Rows whose target cell changed.
    pub modified: usize,
    pub unchanged: usize,
}

/// Rewrite the target column of `table` from `plan`.
///
/// Rows with a planned fix get the full-width-normalized fix; every other
/// row still gets full-width normalization. Rows with a blank identifier are
/// never matched against the plan. Only the target cell is ever
/// written, so row order, identifiers, and other columns are untouched.
/// Applying the same plan twice modifies nothing the second time.
pub fn apply_fixes(
    table: &mut RowTable,
    target_column: &str,
    row_id_column: &str,
    plan: &FixPlan,
) -> Result<TableFixReport, CoreError> {
    let target = table.require_column(target_column)?;
    let row_id = table.require_column(row_id_column)?;

    let mut report = TableFixReport {
        table: table.label.clone(),
        rows: table.row_count(),
        ..TableFixReport::default()
    };

    for index in 0..table.row_count() {
        let id = table.cell(index, row_id).trim();
        let current = table.cell(index, target);
        let planned = if id.is_empty() {
            None
        } else {
            plan.fix_for(&table.label, id)
        };
        let replacement = match planned {
            Some(fix) => {
                report.planned += 1;
                normalize_fullwidth(fix)
            }
            None => normalize_fullwidth(current),
        };

        if replacement == current {
            report.unchanged += 1;
        } else {
            table.set_cell(index, target, replacement);
            report.modified += 1;
        }
    }

    tracing::debug!(
        table = %report.table,
        modified = report.modified,
        unchanged = report.unchanged,
        "fixes applied"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loqa_core::{Finding, FindingKind, Row};
    use pretty_assertions::assert_eq;

    fn entry(table: &str, row_id: &str, suggestion: &str) -> WorklistEntry {
        let row = Row::new(table, row_id, "源", "x");
        let finding = Finding::new(
            FindingKind::WrongTerm,
            "x",
            Some(suggestion.to_string()),
            "",
        );
        WorklistEntry::from_finding(&row, finding)
    }

    fn table() -> RowTable {
        RowTable::new(
            "APP",
            vec!["编号ID".into(), "简体中文".into(), "越语".into()],
            vec![
                vec!["1".into(), "合约".into(), "Hợp đồng".into()],
                vec!["2".into(), "现货".into(), "Giao ngay，".into()],
                vec!["3".into(), "账户".into(), "Tài khoản".into()],
            ],
        )
    }

    #[test]
    fn longer_fix_wins_and_ties_keep_the_first() {
        let entries = vec![
            entry("APP", "1", "Futures"),
            entry("APP", "1", "Hợp đồng Futures"),
            entry("APP", "1", "Short"),
            entry("APP", "2", "Spot1"),
            entry("APP", "2", "Spot2"),
        ];
        let plan = FixPlan::from_worklist(&entries, false);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.fix_for("APP", "1"), Some("Hợp đồng Futures"));
        assert_eq!(plan.fix_for("APP", "2"), Some("Spot1"));
    }

    #[test]
    fn manual_fix_beats_suggestion() {
        let mut manual = entry("APP", "1", "Futures contract account");
        manual.manual_fix = " Futures ".into();
        let plan = FixPlan::from_worklist([&manual], false);
        assert_eq!(plan.fix_for("APP", "1"), Some("Futures"));
    }

    #[test]
    fn confirmation_can_be_required() {
        let mut confirmed = entry("APP", "1", "Futures");
        confirmed.confirmed = "y".into();
        let unconfirmed = entry("APP", "2", "Spot");
        let plan = FixPlan::from_worklist([&confirmed, &unconfirmed], true);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.fix_for("APP", "2"), None);
    }

    #[test]
    fn applies_fixes_and_normalizes_everything_else() {
        let mut table = table();
        let plan = FixPlan::from_worklist([&entry("APP", "1", "Futures（USDT）")], false);
        let report = apply_fixes(&mut table, "越语", "编号ID", &plan).unwrap();

        assert_eq!(table.cell(0, 2), "Futures(USDT)");
        assert_eq!(table.cell(1, 2), "Giao ngay,");
        assert_eq!(table.cell(2, 2), "Tài khoản");
        assert_eq!(table.cell(0, 1), "合约");
        assert_eq!(
            report,
            TableFixReport {
                table: "APP".into(),
                rows: 3,
                planned: 1,
                modified: 2,
                unchanged: 1,
            }
        );
    }

    #[test]
    fn second_pass_changes_nothing() {
        let mut table = table();
        let plan = FixPlan::from_worklist([&entry("APP", "3", "Tài khoản Futures")], false);
        apply_fixes(&mut table, "越语", "编号ID", &plan).unwrap();
        let snapshot = table.clone();

        let report = apply_fixes(&mut table, "越语", "编号ID", &plan).unwrap();
        assert_eq!(report.modified, 0);
        assert_eq!(table, snapshot);
    }

    #[test]
    fn other_tables_are_not_touched_by_the_plan() {
        let mut table = table();
        let plan = FixPlan::from_worklist([&entry("H5", "1", "Futures")], false);
        let report = apply_fixes(&mut table, "越语", "编号ID", &plan).unwrap();
        assert_eq!(report.planned, 0);
        assert_eq!(table.cell(0, 2), "Hợp đồng");
    }

    #[test]
    fn missing_target_column_is_an_error() {
        let mut table = table();
        let error = apply_fixes(&mut table, "韩语", "编号ID", &FixPlan::default()).unwrap_err();
        assert!(matches!(error, CoreError::MissingColumn { .. }));
    }

    #[test]
    fn missing_identifier_column_is_an_error() {
        let mut table = table();
        let plan = FixPlan::from_worklist([&entry("APP", "1", "Futures")], false);
        let error = apply_fixes(&mut table, "越语", "ID", &plan).unwrap_err();
        assert!(matches!(error, CoreError::MissingColumn { ref column, .. } if column == "ID"));
        assert_eq!(table.cell(0, 2), "Hợp đồng");
    }

    #[test]
    fn entries_without_a_row_id_are_ignored() {
        let plan = FixPlan::from_worklist(
            [&entry("APP", "", "Futures"), &entry("APP", " ", "Spot")],
            false,
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn rows_with_a_blank_identifier_only_get_normalized() {
        let mut table = RowTable::new(
            "APP",
            vec!["编号ID".into(), "简体中文".into(), "越语".into()],
            vec![
                vec![String::new(), "合约".into(), "Hợp đồng，".into()],
                vec!["  ".into(), "现货".into(), "Giao ngay".into()],
                vec!["1".into(), "账户".into(), "Tài khoản".into()],
            ],
        );
        let mut plan = FixPlan::from_worklist([&entry("APP", "1", "Tài khoản Futures")], false);
        plan.fixes.insert(("APP".into(), String::new()), "Futures".into());

        let report = apply_fixes(&mut table, "越语", "编号ID", &plan).unwrap();
        assert_eq!(report.planned, 1);
        assert_eq!(table.cell(0, 2), "Hợp đồng,");
        assert_eq!(table.cell(1, 2), "Giao ngay");
        assert_eq!(table.cell(2, 2), "Tài khoản Futures");
    }
}
