//! Intermediate Document Format (IDF)
//! The structural tree a markup source is parsed into before layout, plus the
//! title and citation metadata extracted alongside it.

use quire_style::TextAlign;

pub type TextStr = String;

/// A block-level node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        children: Vec<Inline>,
        is_reference_section: bool,
    },
    /// A paragraph, containing only inline content.
    Paragraph { children: Vec<Inline> },
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    Table(TableNode),
    /// A block-level image.
    Image { src: TextStr, alt: TextStr },
    CodeBlock {
        language: Option<TextStr>,
        code: TextStr,
    },
    BlockQuote { children: Vec<Block> },
    /// Display math, source without the `$$` delimiters.
    MathBlock { source: TextStr },
}

impl Block {
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<Inline>) -> Self {
        Block::Heading {
            level,
            children,
            is_reference_section: false,
        }
    }

    /// Returns a string identifier for the node type, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List { .. } => "list",
            Block::Table(_) => "table",
            Block::Image { .. } => "image",
            Block::CodeBlock { .. } => "code",
            Block::BlockQuote { .. } => "blockquote",
            Block::MathBlock { .. } => "math",
        }
    }

    /// The inline children of inline-bearing blocks.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Heading { children, .. } | Block::Paragraph { children } => Some(children),
            _ => None,
        }
    }

    /// True for a paragraph with nothing to draw: no children, or only whitespace text.
    pub fn is_blank_paragraph(&self) -> bool {
        match self {
            Block::Paragraph { children } => children.iter().all(|c| match c {
                Inline::Text(t) => t.trim().is_empty(),
                _ => false,
            }),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub children: Vec<Block>,
}

/// An inline node. Only `Strong` and `Emphasis` nest.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(TextStr),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(TextStr),
    /// Inline math, source without the `$` delimiters.
    Math(TextStr),
    Image { src: TextStr, alt: TextStr },
}

/// Concatenates the visible text of an inline sequence.
///
/// Math contributes its source and images their alt text.
pub fn flatten_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    flatten_into(inlines, &mut out);
    out
}

fn flatten_into(inlines: &[Inline], out: &mut String) {
    for node in inlines {
        match node {
            Inline::Text(t) | Inline::Code(t) | Inline::Math(t) => out.push_str(t),
            Inline::Strong(children) | Inline::Emphasis(children) => flatten_into(children, out),
            Inline::Image { alt, .. } => out.push_str(alt),
        }
    }
}

/// Concatenates the visible text of every block, in document order.
pub fn flatten_blocks(blocks: &[Block]) -> String {
    let mut parts = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { children, .. } | Block::Paragraph { children } => {
                parts.push(flatten_inlines(children))
            }
            Block::List { items, .. } => {
                for item in items {
                    parts.push(flatten_blocks(&item.children));
                }
            }
            Block::BlockQuote { children } => parts.push(flatten_blocks(children)),
            Block::CodeBlock { code, .. } => parts.push(code.clone()),
            Block::MathBlock { source } => parts.push(source.clone()),
            Block::Image { alt, .. } => parts.push(alt.clone()),
            Block::Table(table) => {
                parts.extend(table.header.iter().cloned());
                for row in &table.rows {
                    parts.extend(row.iter().cloned());
                }
            }
        }
    }
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

/// A pipe table. Cells are kept as plain strings; inline math markers (`$...$`) survive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableNode {
    pub alignments: Vec<TextAlign>,
    pub header: Vec<TextStr>,
    pub rows: Vec<Vec<TextStr>>,
}

impl TableNode {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Title fallback when neither front-matter nor a level-1 heading provides one.
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// The parsed document handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: TextStr,
    pub author: Option<TextStr>,
    pub blocks: Vec<Block>,
    /// Citation keys in order of appearance, duplicates kept.
    pub citations: Vec<TextStr>,
    /// Reference entries in authored order.
    pub references: Vec<TextStr>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: None,
            blocks: Vec::new(),
            citations: Vec::new(),
            references: Vec::new(),
        }
    }
}
