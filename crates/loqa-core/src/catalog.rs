//! Source-table labelling and preference order.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A named source table and the file-name fragments that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLabel {
    pub label: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl TableLabel {
    #[must_use]
    pub fn new(label: &str, patterns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Known source tables in worklist preference order.
///
/// A file whose lower-cased name contains one of a label's patterns gets
/// that label; the first matching label wins. Files matching nothing are
/// labelled by their own file name and sort after every known label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTableCatalog {
    labels: Vec<TableLabel>,
}

impl Default for SourceTableCatalog {
    fn default() -> Self {
        Self::new(vec![
            TableLabel::new("APP", &["app"]),
            TableLabel::new("H5", &["h5"]),
            TableLabel::new("Web", &["web"]),
            TableLabel::new("代理后台", &["代理", "agent"]),
        ])
    }
}

/// Position of a table label in the preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRank<'a> {
    Known(usize),
    Unknown(&'a str),
}

impl PartialOrd for TableRank<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TableRank<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a.cmp(b),
            (Self::Known(_), Self::Unknown(_)) => Ordering::Less,
            (Self::Unknown(_), Self::Known(_)) => Ordering::Greater,
            (Self::Unknown(a), Self::Unknown(b)) => a.cmp(b),
        }
    }
}

impl SourceTableCatalog {
    #[must_use]
    pub const fn new(labels: Vec<TableLabel>) -> Self {
        Self { labels }
    }

    #[must_use]
    pub fn labels(&self) -> &[TableLabel] {
        &self.labels
    }

    /// Label for a table file.
    #[must_use]
    pub fn label_for_path(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());
        let lowered = file_name.to_lowercase();

        self.labels
            .iter()
            .find(|entry| {
                entry
                    .patterns
                    .iter()
                    .any(|pattern| lowered.contains(&pattern.to_lowercase()))
            })
            .map_or_else(|| file_name.into_owned(), |entry| entry.label.clone())
    }

    #[must_use]
    pub fn rank<'a>(&self, label: &'a str) -> TableRank<'a> {
        self.labels
            .iter()
            .position(|entry| entry.label == label)
            .map_or(TableRank::Unknown(label), TableRank::Known)
    }
}
