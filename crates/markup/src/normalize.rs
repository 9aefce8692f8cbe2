//! Line-level rewriting that runs before the markdown grammar sees the source.
//!
//! The output stream puts every paragraph on its own line separated by a blank
//! line, lifts pipe tables out into a side table, rewrites wiki-style embeds
//! and links into plain markdown, and isolates display math.

use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const FRONT_MATTER_DELIMITER: &str = "---";
const MATH_DELIMITER: &str = "$$";

static TABLE_DIVIDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?\s*$")
        .expect("BUG: invalid TABLE_DIVIDER_RE regex literal")
});

/// `![[path]]` or `![[path|alt]]`; the alias pipe may be escaped inside tables.
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\]|\\]+?)(?:\\?\|([^\]]*))?\]\]")
        .expect("BUG: invalid EMBED_RE regex literal")
});

static WIKI_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]|\\]+?)(?:\\?\|([^\]]*))?\]\]")
        .expect("BUG: invalid WIKI_LINK_RE regex literal")
});

/// The placeholder line standing in for table block `index`.
pub fn table_placeholder(index: usize) -> String {
    format!("%%TABLE-{}%%", index)
}

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^%%TABLE-(\d+)%%$").expect("BUG: invalid PLACEHOLDER_RE regex literal")
});

/// Returns the table index a placeholder line refers to.
pub fn parse_table_placeholder(text: &str) -> Option<usize> {
    PLACEHOLDER_RE
        .captures(text.trim())
        .and_then(|c| c[1].parse().ok())
}

/// The raw lines of one pipe table: header, divider, then body rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSource {
    pub lines: Vec<String>,
    pub tables: Vec<TableBlock>,
    /// Raw text between the front-matter delimiters, if the source has any.
    pub front_matter: Option<String>,
    /// Index of the first line after the front-matter block.
    pub body_start: usize,
}

impl NormalizedSource {
    /// The full canonical stream, front-matter included.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The canonical stream after the front-matter block.
    pub fn body_text(&self) -> String {
        self.lines
            .get(self.body_start..)
            .map(|body| body.join("\n"))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    FrontMatter,
    CodeFence,
}

fn is_code_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// True when `line` opens a pipe table: it has a column separator and `next`
/// is a header/body divider row.
pub fn is_table_start(line: &str, next: Option<&str>) -> bool {
    line.contains('|')
        && next.is_some_and(|n| n.contains('|') && TABLE_DIVIDER_RE.is_match(n))
}

fn percent_encode_spaces(path: &str) -> String {
    path.trim().replace(' ', "%20")
}

/// Rewrites `![[path|alt]]` embeds into `![alt](path)` links.
pub fn rewrite_embeds(line: &str) -> String {
    EMBED_RE
        .replace_all(line, |caps: &Captures| {
            let target = &caps[1];
            let alt = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| target.trim());
            format!("![{}]({})", alt, percent_encode_spaces(target))
        })
        .into_owned()
}

/// Rewrites `[[target|alias]]` links into their visible text.
pub fn rewrite_wiki_links(line: &str) -> String {
    WIKI_LINK_RE
        .replace_all(line, |caps: &Captures| {
            caps.get(2)
                .map(|m| m.as_str().trim())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| caps[1].trim())
                .to_string()
        })
        .into_owned()
}

fn rewrite_links(line: &str) -> String {
    rewrite_wiki_links(&rewrite_embeds(line))
}

struct Emitter {
    lines: Vec<String>,
}

impl Emitter {
    fn raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Emits `line` as its own paragraph.
    fn paragraph(&mut self, line: impl Into<String>) {
        if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
            self.blank();
        }
        self.lines.push(line.into());
    }

    /// Emits a prose line, splitting out any `$$...$$` spans as their own paragraphs.
    fn prose(&mut self, line: &str) {
        let mut rest = line;
        while let Some(open) = rest.find(MATH_DELIMITER) {
            let after_open = open + MATH_DELIMITER.len();
            let Some(close) = rest[after_open..].find(MATH_DELIMITER) else {
                break;
            };
            let end = after_open + close + MATH_DELIMITER.len();

            let lead = rest[..open].trim_end();
            if !lead.trim().is_empty() {
                self.paragraph(lead);
            }
            self.paragraph(&rest[open..end]);
            rest = rest[end..].trim_start();
        }
        if !rest.trim().is_empty() {
            self.paragraph(rest);
        }
    }
}

/// Finds the closing delimiter of a front-matter block opened on the first line.
fn find_front_matter_close(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .skip(1)
        .position(|l| l.trim() == FRONT_MATTER_DELIMITER)
        .map(|offset| offset + 1)
}

/// Finds the closing `$$` line of a multi-line math block opened at `start`.
fn find_math_close(lines: &[&str], start: usize) -> Option<usize> {
    lines[start + 1..]
        .iter()
        .position(|l| l.trim() == MATH_DELIMITER)
        .map(|offset| start + 1 + offset)
}

/// Rewrites raw source lines into the canonical line stream.
pub fn normalize(source: &str) -> NormalizedSource {
    let lines: Vec<&str> = source.lines().collect();
    let mut out = Emitter { lines: Vec::new() };
    let mut tables = Vec::new();
    let mut front_matter: Option<Vec<&str>> = None;
    let mut body_start = 0;
    let mut mode = Mode::Normal;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        match mode {
            Mode::FrontMatter => {
                out.raw(line);
                if line.trim() == FRONT_MATTER_DELIMITER {
                    body_start = out.lines.len();
                    out.blank();
                    mode = Mode::Normal;
                } else if let Some(yaml) = front_matter.as_mut() {
                    yaml.push(line);
                }
                i += 1;
            }
            Mode::CodeFence => {
                out.raw(line);
                if is_code_fence(line) {
                    mode = Mode::Normal;
                }
                i += 1;
            }
            Mode::Normal => {
                if i == 0
                    && line.trim() == FRONT_MATTER_DELIMITER
                    && find_front_matter_close(&lines).is_some()
                {
                    out.raw(line);
                    front_matter = Some(Vec::new());
                    mode = Mode::FrontMatter;
                    i += 1;
                } else if is_code_fence(line) {
                    out.paragraph(line);
                    mode = Mode::CodeFence;
                    i += 1;
                } else if line.trim().is_empty() {
                    i += 1;
                } else if is_table_start(line, lines.get(i + 1).copied()) {
                    let mut block = TableBlock::default();
                    while i < lines.len() && lines[i].contains('|') && !lines[i].trim().is_empty() {
                        block.lines.push(rewrite_links(lines[i]));
                        i += 1;
                    }
                    debug!(
                        "Extracted table {} with {} lines",
                        tables.len(),
                        block.lines.len()
                    );
                    out.paragraph(table_placeholder(tables.len()));
                    tables.push(block);
                } else if line.trim() == MATH_DELIMITER
                    && let Some(close) = find_math_close(&lines, i)
                {
                    let body: Vec<&str> = lines[i + 1..close]
                        .iter()
                        .map(|l| l.trim())
                        .filter(|l| !l.is_empty())
                        .collect();
                    out.prose(&format!("$${}$$", body.join(" ")));
                    i = close + 1;
                } else {
                    out.prose(&rewrite_links(line));
                    i += 1;
                }
            }
        }
    }

    NormalizedSource {
        lines: out.lines,
        tables,
        front_matter: front_matter.map(|yaml| yaml.join("\n")),
        body_start,
    }
}
