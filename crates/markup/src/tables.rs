//! Rebuilds extracted pipe-table blocks into table nodes.

use crate::normalize::TableBlock;
use log::warn;
use pulldown_cmark::{Event, Options, Parser};
use quire_idf::TableNode;
use quire_style::TextAlign;
use regex::Regex;
use std::sync::LazyLock;

/// Cell openings the block grammar would read as a list item, heading,
/// quote or thematic break instead of inline text.
static BLOCK_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-+*](?:\s|$)|[-*_ ]{3,}$|#|>)")
        .expect("BUG: invalid BLOCK_MARKER_RE regex literal")
});

static ORDERED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)([.)])(\s|$)").expect("BUG: invalid ORDERED_MARKER_RE regex literal")
});

/// Backslash-escapes a leading block marker so the cell parses as inline text.
fn escape_block_marker(cell: &str) -> String {
    if BLOCK_MARKER_RE.is_match(cell) {
        format!("\\{}", cell)
    } else {
        ORDERED_MARKER_RE.replace(cell, "${1}\\${2}${3}").into_owned()
    }
}

/// Splits a table row into trimmed cells. `\|` is a literal pipe.
pub fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = if inner.ends_with('|') && !inner.ends_with("\\|") {
        &inner[..inner.len() - 1]
    } else {
        inner
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

fn parse_alignment(cell: &str) -> TextAlign {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => TextAlign::Center,
        (false, true) => TextAlign::Right,
        _ => TextAlign::Left,
    }
}

/// Flattens one cell's inline markdown to plain text.
///
/// Emphasis and code markers are dropped and images collapse to their alt
/// text. Inline math keeps its `$...$` delimiters so the table renderer can
/// resolve it.
pub fn flatten_cell(cell: &str) -> String {
    let source = escape_block_marker(cell);
    let mut out = String::new();
    for event in Parser::new_ext(&source, Options::ENABLE_MATH) {
        match event {
            Event::Text(text) | Event::Code(text) | Event::Html(text) | Event::InlineHtml(text) => {
                out.push_str(&text)
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                out.push('$');
                out.push_str(math.trim());
                out.push('$');
            }
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn flatten_row(row: Vec<String>) -> Vec<String> {
    row.iter().map(|cell| flatten_cell(cell)).collect()
}

/// Forces `row` to exactly `width` cells: short rows are padded with empty
/// cells and long rows truncated.
fn fit_row(mut row: Vec<String>, width: usize, line_no: usize) -> Vec<String> {
    if row.len() != width {
        warn!(
            "Table row {} has {} cells, expected {}; normalizing",
            line_no,
            row.len(),
            width
        );
        row.resize(width, String::new());
    }
    row
}

/// Builds a [`TableNode`] from a header line, a divider line and body lines.
pub fn build_table(block: &TableBlock) -> TableNode {
    let Some(header_line) = block.lines.first() else {
        return TableNode::default();
    };
    let header = flatten_row(split_row(header_line));
    let width = header.len();

    let mut alignments: Vec<TextAlign> = block
        .lines
        .get(1)
        .map(|divider| split_row(divider).iter().map(|c| parse_alignment(c)).collect())
        .unwrap_or_default();
    alignments.resize(width, TextAlign::Left);

    let rows = block
        .lines
        .iter()
        .enumerate()
        .skip(2)
        .map(|(i, line)| flatten_row(fit_row(split_row(line), width, i + 1)))
        .collect();

    TableNode {
        alignments,
        header,
        rows,
    }
}
