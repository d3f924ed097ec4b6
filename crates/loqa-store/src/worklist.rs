//! Worklist CSV: written by `scan`, edited by reviewers, read back by `fix`.

use std::fs;
use std::path::{Path, PathBuf};

use loqa_core::{CoreError, FindingKind, WorklistEntry};

use crate::error::StoreError;
use crate::table::{BOM, strip_bom};

/// Worklist columns in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Seq,
    Table,
    RowId,
    Priority,
    Kind,
    ContextKey,
    Current,
    Suggestion,
    Confirmed,
    ManualFix,
}

impl Column {
    const ALL: [Self; 10] = [
        Self::Seq,
        Self::Table,
        Self::RowId,
        Self::Priority,
        Self::Kind,
        Self::ContextKey,
        Self::Current,
        Self::Suggestion,
        Self::Confirmed,
        Self::ManualFix,
    ];

    const fn name(self) -> &'static str {
        match self {
            Self::Seq => "seq",
            Self::Table => "table",
            Self::RowId => "row_id",
            Self::Priority => "priority",
            Self::Kind => "kind",
            Self::ContextKey => "context_key",
            Self::Current => "current",
            Self::Suggestion => "suggestion",
            Self::Confirmed => "confirmed",
            Self::ManualFix => "manual_fix",
        }
    }

    /// Header used by worklists produced by the earlier tooling.
    const fn legacy_name(self) -> &'static str {
        match self {
            Self::Seq => "序号",
            Self::Table => "来源",
            Self::RowId => "编号ID",
            Self::Priority => "优先级",
            Self::Kind => "问题类型",
            Self::ContextKey => "语言标识",
            Self::Current => "当前翻译",
            Self::Suggestion => "建议修正",
            Self::Confirmed => "确认",
            Self::ManualFix => "人工修正",
        }
    }

    fn matches(self, header: &str) -> bool {
        let header = header.trim();
        header == self.name() || header == self.legacy_name()
    }
}

/// Default worklist file for a target column.
#[must_use]
pub fn worklist_path(output_dir: &Path, target_column: &str) -> PathBuf {
    output_dir.join(format!("{target_column}_worklist.csv"))
}

fn entry_fields(entry: &WorklistEntry) -> [String; 10] {
    [
        entry.seq.to_string(),
        entry.table.clone(),
        entry.row_id.clone(),
        entry.priority.to_string(),
        entry.kind.to_string(),
        entry.context_key.clone(),
        entry.current.clone(),
        entry.suggestion.clone(),
        entry.confirmed.clone(),
        entry.manual_fix.clone(),
    ]
}

/// Serialize a worklist: byte-order mark, every field quoted.
pub fn render_worklist(entries: &[WorklistEntry], path: &Path) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(BOM.to_vec());
    writer
        .write_record(Column::ALL.map(Column::name))
        .map_err(|source| StoreError::csv(path, source))?;
    for entry in entries {
        writer
            .write_record(entry_fields(entry))
            .map_err(|source| StoreError::csv(path, source))?;
    }
    writer
        .into_inner()
        .map_err(|error| StoreError::io(path, error.into_error()))
}

pub fn write_worklist(path: &Path, entries: &[WorklistEntry]) -> Result<(), StoreError> {
    let bytes = render_worklist(entries, path)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::io(parent, source))?;
    }
    fs::write(path, bytes).map_err(|source| StoreError::io(path, source))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "worklist written");
    Ok(())
}

/// Kind given to rows a reviewer added without one.
const UNLABELLED_KIND: FindingKind = FindingKind::WrongTerm;

/// Parse a worklist, accepting either the current or the legacy header.
///
/// `table` and `row_id` columns are required; the rest default to empty. A
/// blank kind reads as [`UNLABELLED_KIND`]; an unknown one is an error.
pub fn parse_worklist(bytes: &[u8], path: &Path) -> Result<Vec<WorklistEntry>, StoreError> {
    let (body, _) = strip_bom(bytes);
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);
    let headers = reader
        .headers()
        .map_err(|source| StoreError::csv(path, source))?
        .clone();

    let position = |column: Column| headers.iter().position(|header| column.matches(header));
    let required = |column: Column| {
        position(column).ok_or_else(|| StoreError::MissingColumn {
            path: path.to_path_buf(),
            column: column.name().to_string(),
        })
    };
    let table = required(Column::Table)?;
    let row_id = required(Column::RowId)?;
    let positions = Column::ALL.map(position);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| StoreError::csv(path, source))?;
        let line = record.position().map_or(0, csv::Position::line);
        let field = |column: Column| {
            positions[column as usize]
                .and_then(|at| record.get(at))
                .unwrap_or_default()
                .to_string()
        };
        let invalid = |reason: String| StoreError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let kind: FindingKind = match field(Column::Kind).trim() {
            "" => UNLABELLED_KIND,
            value => value
                .parse()
                .map_err(|error: CoreError| invalid(error.to_string()))?,
        };
        let priority = match field(Column::Priority).trim() {
            "" => kind.priority(),
            value => value
                .parse()
                .map_err(|error: CoreError| invalid(error.to_string()))?,
        };

        entries.push(WorklistEntry {
            seq: field(Column::Seq).trim().parse().unwrap_or(0),
            table: record.get(table).unwrap_or_default().trim().to_string(),
            row_id: record.get(row_id).unwrap_or_default().trim().to_string(),
            priority,
            kind,
            context_key: field(Column::ContextKey),
            current: field(Column::Current),
            suggestion: field(Column::Suggestion),
            detail: String::new(),
            confirmed: field(Column::Confirmed),
            manual_fix: field(Column::ManualFix),
        });
    }
    Ok(entries)
}

pub fn read_worklist(path: &Path) -> Result<Vec<WorklistEntry>, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::io(path, source))?;
    let entries = parse_worklist(&bytes, path)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "worklist read");
    Ok(entries)
}
