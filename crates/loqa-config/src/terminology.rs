//! Terminology document location.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default ceiling on source length for term-table lookups by source text.
const fn default_max_source_chars() -> usize {
    8
}

fn default_languages() -> IndexMap<String, String> {
    [
        ("越语", "越南语"),
        ("韩语", "韩语"),
        ("日语", "日语"),
        ("英语", "英语"),
        ("泰语", "泰语"),
    ]
    .into_iter()
    .map(|(column, stem)| (column.to_string(), stem.to_string()))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TerminologyConfig {
    /// Explicit terminology document. Wins over `dir` + `languages`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Directory holding one `<stem>.md` document per target language.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Target column name → document stem.
    #[serde(default = "default_languages")]
    pub languages: IndexMap<String, String>,

    /// The general term table is consulted by source text only for sources
    /// at most this many characters long.
    #[serde(default = "default_max_source_chars")]
    pub max_source_chars: usize,
}

impl Default for TerminologyConfig {
    fn default() -> Self {
        Self {
            path: None,
            dir: None,
            languages: default_languages(),
            max_source_chars: default_max_source_chars(),
        }
    }
}

impl TerminologyConfig {
    /// Resolve the document for a target column.
    ///
    /// `explicit` (a CLI flag) beats `path`, which beats `dir/<stem>.md`.
    /// The stem is the configured language name for the column, or the
    /// column name itself.
    #[must_use]
    pub fn resolve(&self, target_column: &str, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        let stem = self
            .languages
            .get(target_column)
            .map_or(target_column, String::as_str);
        self.dir.as_ref().map(|dir| dir.join(format!("{stem}.md")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = TerminologyConfig {
            path: Some(PathBuf::from("configured.md")),
            dir: Some(PathBuf::from("terms")),
            ..TerminologyConfig::default()
        };
        assert_eq!(
            config.resolve("越语", Some(Path::new("cli.md"))),
            Some(PathBuf::from("cli.md"))
        );
        assert_eq!(config.resolve("越语", None), Some(PathBuf::from("configured.md")));
    }

    #[test]
    fn dir_uses_language_stem() {
        let config = TerminologyConfig {
            dir: Some(PathBuf::from("terms")),
            ..TerminologyConfig::default()
        };
        assert_eq!(config.resolve("越语", None), Some(PathBuf::from("terms/越南语.md")));
        assert_eq!(config.resolve("德语", None), Some(PathBuf::from("terms/德语.md")));
    }

    #[test]
    fn nothing_configured_resolves_nothing() {
        assert_eq!(TerminologyConfig::default().resolve("越语", None), None);
    }
}
