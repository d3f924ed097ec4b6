//! # loqa-terms
//!
//! Parses a terminology document (markdown) into [`TerminologyTables`].
//!
//! The document carries several markdown tables, told apart by their
//! headings:
//!
//! - the general term table, `| # | source | reference | standard | uses |`,
//!   recognised anywhere by a numeric first cell
//! - the override table under `核心术语替换表`,
//!   `| source | standard | forbidden usages |`
//! - the translation blacklist under `错误翻译黑名单`,
//!   `| wrong | correct | source |`
//! - the fragment map under a `中文残留片段…映射` heading,
//!   `| source fragment | replacement |`
//!
//! Tables are read with `pulldown-cmark`, so header rows never count as data
//! and cells keep their column position. Every map keeps document order;
//! a repeated key keeps its first position and takes the last value.

mod error;
mod markdown;

pub use error::TermsError;

use std::path::Path;

use indexmap::IndexMap;
use loqa_core::fullwidth::normalize_fullwidth;
use loqa_core::{ForbiddenUsage, TerminologyTables};

use markdown::{Block, all_rows, blocks, section_rows};

const OVERRIDE_HEADING: &str = "核心术语替换表";
const OVERRIDE_ENDS: &[&str] = &["语境判断规则", "错误翻译黑名单", "大小写规则"];
const BLACKLIST_HEADING: &str = "错误翻译黑名单";
const FRAGMENT_HEADING: &str = "中文残留片段";
const FRAGMENT_HEADING_SUFFIX: &str = "映射";

/// Notes in the forbidden-usage column that are prose, not a list.
const FORBIDDEN_PROSE_MARKERS: &[&str] = &["❌", "禁止"];

/// Parse a terminology document.
#[must_use]
pub fn parse_terminology(text: &str) -> TerminologyTables {
    let blocks = blocks(text);
    let (overrides, mut forbidden) = parse_overrides(&blocks);
    forbidden.extend(parse_blacklist(&blocks));
    TerminologyTables {
        terms: parse_terms(&blocks),
        overrides,
        fragments: parse_fragments(&blocks),
        forbidden,
    }
}

/// Read and parse a terminology document from disk.
pub fn load_terminology(path: &Path) -> Result<TerminologyTables, TermsError> {
    if !path.exists() {
        return Err(TermsError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| TermsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tables = parse_terminology(&text);
    tracing::info!(
        path = %path.display(),
        terms = tables.terms.len(),
        overrides = tables.overrides.len(),
        forbidden = tables.forbidden.len(),
        fragments = tables.fragments.len(),
        "terminology loaded"
    );
    Ok(tables)
}

/// Like [`load_terminology`], but a missing or unreadable document yields
/// empty tables with a warning. Non-terminology checks still run.
#[must_use]
pub fn load_or_empty(path: Option<&Path>) -> TerminologyTables {
    let Some(path) = path else {
        tracing::warn!("no terminology document configured; terminology checks are off");
        return TerminologyTables::default();
    };
    load_terminology(path).unwrap_or_else(|error| {
        tracing::warn!(%error, "terminology unavailable; continuing with empty tables");
        TerminologyTables::default()
    })
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn parse_terms(blocks: &[Block]) -> IndexMap<String, String> {
    let mut terms = IndexMap::new();
    for cells in all_rows(blocks) {
        if cells.len() < 4 || cells[1].is_empty() || cells[3].is_empty() {
            continue;
        }
        if cells[0].parse::<i64>().is_err() {
            continue;
        }
        terms.insert(cells[1].clone(), normalize_fullwidth(&cells[3]));
    }
    terms
}

fn parse_overrides(
    blocks: &[Block],
) -> (IndexMap<String, String>, IndexMap<String, ForbiddenUsage>) {
    let mut overrides = IndexMap::new();
    let mut forbidden = IndexMap::new();

    let rows = section_rows(
        blocks,
        |_, heading| heading.contains(OVERRIDE_HEADING),
        |level, heading| level >= 3 && OVERRIDE_ENDS.iter().any(|end| heading.contains(end)),
    );
    for cells in rows {
        if cells.len() < 3 || cells[0].is_empty() || cells[1].is_empty() {
            continue;
        }
        let (source, standard, notes) = (&cells[0], &cells[1], &cells[2]);
        overrides.insert(source.clone(), standard.clone());

        if FORBIDDEN_PROSE_MARKERS.iter().any(|marker| notes.contains(marker)) {
            continue;
        }
        for usage in notes.split([',', '，', '、']).map(str::trim) {
            if usage.is_empty() {
                continue;
            }
            forbidden.insert(
                usage.to_string(),
                ForbiddenUsage {
                    correct: standard.clone(),
                    source: source.clone(),
                },
            );
        }
    }
    (overrides, forbidden)
}

fn parse_blacklist(blocks: &[Block]) -> IndexMap<String, ForbiddenUsage> {
    let mut forbidden = IndexMap::new();
    let rows = section_rows(
        blocks,
        |_, heading| heading.contains(BLACKLIST_HEADING),
        |_, _| true,
    );
    for cells in rows {
        if cells.len() < 3 || cells[0].is_empty() {
            continue;
        }
        forbidden.insert(
            cells[0].clone(),
            ForbiddenUsage {
                correct: cells[1].clone(),
                source: cells[2].clone(),
            },
        );
    }
    forbidden
}

fn parse_fragments(blocks: &[Block]) -> IndexMap<String, String> {
    let mut fragments = IndexMap::new();
    let rows = section_rows(
        blocks,
        |_, heading| {
            heading.contains(FRAGMENT_HEADING) && heading.contains(FRAGMENT_HEADING_SUFFIX)
        },
        |level, heading| level >= 2 && !heading.contains(FRAGMENT_HEADING),
    );
    for cells in rows {
        if cells.len() < 2 || cells[0].is_empty() {
            continue;
        }
        fragments.insert(cells[0].clone(), cells[1].clone());
    }
    fragments
}
