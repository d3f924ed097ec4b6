//! Headings and tables of a markdown document.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// The parts of a document the terminology parser reads, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: usize, text: String },
    /// Body rows of a table, cells trimmed. The header row is not kept.
    Table(Vec<Vec<String>>),
}

/// Split `text` into headings and tables; everything else is dropped.
pub fn blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut heading: Option<(usize, String)> = None;
    let mut rows: Option<Vec<Vec<String>>> = None;
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<String> = None;

    for event in Parser::new_ext(text, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level as usize, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = heading.take() {
                    blocks.push(Block::Heading {
                        level,
                        text: text.trim().to_string(),
                    });
                }
            }
            Event::Start(Tag::Table(_)) => rows = Some(Vec::new()),
            Event::End(TagEnd::Table) => {
                if let Some(rows) = rows.take() {
                    blocks.push(Block::Table(rows));
                }
            }
            // Header cells arrive without a row wrapper.
            Event::End(TagEnd::TableHead) => row.clear(),
            Event::Start(Tag::TableRow) => row.clear(),
            Event::End(TagEnd::TableRow) => {
                if let Some(rows) = rows.as_mut() {
                    rows.push(std::mem::take(&mut row));
                }
            }
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::End(TagEnd::TableCell) => {
                if let Some(text) = cell.take() {
                    row.push(text.trim().to_string());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                } else if let Some((_, heading)) = heading.as_mut() {
                    heading.push_str(&text);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Body rows of the tables inside a heading-delimited section.
///
/// A heading matching `opens` starts the section; while inside, a heading
/// matching `closes` ends it. The section may open again further down.
pub fn section_rows<'a>(
    blocks: &'a [Block],
    opens: impl Fn(usize, &str) -> bool,
    closes: impl Fn(usize, &str) -> bool,
) -> Vec<&'a [String]> {
    let mut inside = false;
    let mut rows = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                if opens(*level, text) {
                    inside = true;
                } else if inside && closes(*level, text) {
                    inside = false;
                }
            }
            Block::Table(table) if inside => rows.extend(table.iter().map(Vec::as_slice)),
            Block::Table(_) => {}
        }
    }
    rows
}

/// Body rows of every table in the document.
pub fn all_rows(blocks: &[Block]) -> impl Iterator<Item = &[String]> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Heading { .. } => None,
        })
        .flatten()
        .map(Vec::as_slice)
}
