//! Builds the document tree from a normalized stream.

use crate::citations::{extract_citation_keys, is_reference_heading};
use crate::frontmatter::{FrontMatter, parse_front_matter};
use crate::normalize::{NormalizedSource, TableBlock, parse_table_placeholder};
use crate::tables::build_table;
use crate::ParseError;
use log::{debug, warn};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use quire_idf::{Block, DEFAULT_TITLE, Document, Inline, ListItem, flatten_blocks, flatten_inlines};
use regex::Regex;
use std::sync::LazyLock;

static TAG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[\p{L}\p{N}_/-]+(\s+#[\p{L}\p{N}_/-]+)*$")
        .expect("BUG: invalid TAG_LINE_RE regex literal")
});

/// Containers that hold blocks.
enum BlockFrame {
    Root(Vec<Block>),
    BlockQuote(Vec<Block>),
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    Item(Vec<Block>),
}

/// Containers that hold inlines.
enum InlineFrame {
    Paragraph {
        children: Vec<Inline>,
        has_display_math: bool,
        /// Opened for the bare text of a tight list item.
        implicit: bool,
    },
    Heading {
        level: u8,
        children: Vec<Inline>,
    },
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link(Vec<Inline>),
    Image {
        src: String,
        alt: String,
    },
}

impl InlineFrame {
    fn paragraph(implicit: bool) -> Self {
        InlineFrame::Paragraph {
            children: Vec::new(),
            has_display_math: false,
            implicit,
        }
    }
}

fn push_merged(children: &mut Vec<Inline>, node: Inline) {
    if let Inline::Text(text) = &node
        && let Some(Inline::Text(prev)) = children.last_mut()
    {
        prev.push_str(text);
        return;
    }
    children.push(node);
}

struct TreeBuilder<'a> {
    blocks: Vec<BlockFrame>,
    inlines: Vec<InlineFrame>,
    code: Option<(Option<String>, String)>,
    tables: &'a [TableBlock],
}

impl<'a> TreeBuilder<'a> {
    fn new(tables: &'a [TableBlock]) -> Self {
        Self {
            blocks: vec![BlockFrame::Root(Vec::new())],
            inlines: Vec::new(),
            code: None,
            tables,
        }
    }

    fn process(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((_, code)) = self.code.as_mut() {
                    code.push_str(&text);
                } else {
                    self.push_inline(Inline::Text(text.into_string()));
                }
            }
            Event::Code(text) => self.push_inline(Inline::Code(text.into_string())),
            Event::InlineMath(text) => self.push_inline(Inline::Math(text.into_string())),
            Event::DisplayMath(text) => {
                self.push_inline(Inline::Math(text.into_string()));
                if let Some(InlineFrame::Paragraph {
                    has_display_math, ..
                }) = self.inlines.first_mut()
                {
                    *has_display_math = true;
                }
            }
            Event::SoftBreak | Event::HardBreak => self.push_inline(Inline::Text(" ".to_string())),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => self.inlines.push(InlineFrame::paragraph(false)),
            Tag::Heading { level, .. } => self.inlines.push(InlineFrame::Heading {
                level: level as u8,
                children: Vec::new(),
            }),
            Tag::BlockQuote(_) => {
                self.close_implicit_paragraph();
                self.blocks.push(BlockFrame::BlockQuote(Vec::new()));
            }
            Tag::List(start) => {
                self.close_implicit_paragraph();
                self.blocks.push(BlockFrame::List {
                    ordered: start.is_some(),
                    start: start.unwrap_or(1),
                    items: Vec::new(),
                });
            }
            Tag::Item => self.blocks.push(BlockFrame::Item(Vec::new())),
            Tag::CodeBlock(kind) => {
                self.close_implicit_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::Strong => self.inlines.push(InlineFrame::Strong(Vec::new())),
            Tag::Emphasis => self.inlines.push(InlineFrame::Emphasis(Vec::new())),
            Tag::Link { .. } => self.inlines.push(InlineFrame::Link(Vec::new())),
            Tag::Image { dest_url, .. } => self.inlines.push(InlineFrame::Image {
                src: dest_url.into_string(),
                alt: String::new(),
            }),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => {
                if let Some(block) = self.inlines.pop().and_then(|f| self.finish_inline_block(f)) {
                    self.append_block(block);
                }
            }
            TagEnd::BlockQuote(_) => {
                self.close_implicit_paragraph();
                if let Some(BlockFrame::BlockQuote(children)) = self.blocks.pop() {
                    self.append_block(Block::BlockQuote { children });
                }
            }
            TagEnd::List(_) => {
                if let Some(BlockFrame::List {
                    ordered,
                    start,
                    items,
                }) = self.blocks.pop()
                {
                    self.append_block(Block::List {
                        ordered,
                        start,
                        items,
                    });
                }
            }
            TagEnd::Item => {
                self.close_implicit_paragraph();
                if let Some(BlockFrame::Item(children)) = self.blocks.pop()
                    && let Some(BlockFrame::List { items, .. }) = self.blocks.last_mut()
                {
                    items.push(ListItem { children });
                }
            }
            TagEnd::CodeBlock => {
                if let Some((language, code)) = self.code.take() {
                    self.append_block(Block::CodeBlock {
                        language,
                        code: code.trim_end_matches('\n').to_string(),
                    });
                }
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link | TagEnd::Image => {
                if let Some(frame) = self.inlines.pop() {
                    self.close_inline_frame(frame);
                }
            }
            _ => {}
        }
    }

    fn close_inline_frame(&mut self, frame: InlineFrame) {
        match frame {
            InlineFrame::Strong(children) => self.push_inline(Inline::Strong(children)),
            InlineFrame::Emphasis(children) => self.push_inline(Inline::Emphasis(children)),
            InlineFrame::Link(children) => {
                for child in children {
                    self.push_inline(child);
                }
            }
            InlineFrame::Image { src, alt } => self.push_inline(Inline::Image { src, alt }),
            // Paragraph-level frames are only closed by their own end tags.
            other => self.inlines.push(other),
        }
    }

    fn push_inline(&mut self, node: Inline) {
        if self.inlines.is_empty() {
            self.inlines.push(InlineFrame::paragraph(true));
        }
        let Some(frame) = self.inlines.last_mut() else {
            return;
        };
        match frame {
            InlineFrame::Paragraph { children, .. }
            | InlineFrame::Heading { children, .. }
            | InlineFrame::Strong(children)
            | InlineFrame::Emphasis(children)
            | InlineFrame::Link(children) => push_merged(children, node),
            InlineFrame::Image { alt, .. } => alt.push_str(&flatten_inlines(&[node])),
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.inlines.last(),
            Some(InlineFrame::Paragraph { implicit: true, .. })
        ) && let Some(frame) = self.inlines.pop()
            && let Some(block) = self.finish_inline_block(frame)
        {
            self.append_block(block);
        }
    }

    fn finish_inline_block(&self, frame: InlineFrame) -> Option<Block> {
        match frame {
            InlineFrame::Heading { level, children } => Some(Block::heading(level, children)),
            InlineFrame::Paragraph {
                children,
                has_display_math,
                ..
            } => Some(self.finish_paragraph(children, has_display_math)),
            _ => None,
        }
    }

    fn finish_paragraph(&self, children: Vec<Inline>, has_display_math: bool) -> Block {
        if has_display_math {
            let mut content = children
                .iter()
                .filter(|c| !matches!(c, Inline::Text(t) if t.trim().is_empty()));
            if let (Some(Inline::Math(source)), None) = (content.next(), content.next()) {
                return Block::MathBlock {
                    source: source.trim().to_string(),
                };
            }
        }

        if let Some(index) = parse_table_placeholder(&flatten_inlines(&children)) {
            match self.tables.get(index) {
                Some(table) => return Block::Table(build_table(table)),
                None => warn!("{}", ParseError::MissingTable(index)),
            }
        }
        Block::paragraph(children)
    }

    fn append_block(&mut self, block: Block) {
        match self.blocks.last_mut() {
            Some(BlockFrame::Root(children))
            | Some(BlockFrame::BlockQuote(children))
            | Some(BlockFrame::Item(children)) => children.push(block),
            Some(BlockFrame::List { items, .. }) => items.push(ListItem {
                children: vec![block],
            }),
            None => warn!("Dropping {} block outside of any container", block.kind()),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_implicit_paragraph();
        // Unwind anything left open by truncated input.
        while self.blocks.len() > 1 {
            let block = match self.blocks.pop() {
                Some(BlockFrame::BlockQuote(children)) => Some(Block::BlockQuote { children }),
                Some(BlockFrame::List {
                    ordered,
                    start,
                    items,
                }) => Some(Block::List {
                    ordered,
                    start,
                    items,
                }),
                _ => None,
            };
            if let Some(block) = block {
                self.append_block(block);
            }
        }
        match self.blocks.pop() {
            Some(BlockFrame::Root(blocks)) => blocks,
            _ => Vec::new(),
        }
    }
}

fn is_tag_only(block: &Block) -> bool {
    match block {
        Block::Paragraph { children } => {
            children.iter().all(|c| matches!(c, Inline::Text(_)))
                && TAG_LINE_RE.is_match(flatten_inlines(children).trim())
        }
        _ => false,
    }
}

fn remove_tag_paragraphs(blocks: &mut Vec<Block>) {
    blocks.retain(|b| !is_tag_only(b));
    for block in blocks.iter_mut() {
        match block {
            Block::BlockQuote { children } => remove_tag_paragraphs(children),
            Block::List { items, .. } => {
                for item in items.iter_mut() {
                    remove_tag_paragraphs(&mut item.children);
                }
            }
            _ => {}
        }
    }
}

fn collect_inline_citations(inlines: &[Inline], out: &mut Vec<String>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.extend(extract_citation_keys(text)),
            Inline::Strong(children) | Inline::Emphasis(children) => {
                collect_inline_citations(children, out)
            }
            _ => {}
        }
    }
}

fn collect_citations(blocks: &[Block], out: &mut Vec<String>) {
    for block in blocks {
        match block {
            Block::Heading { children, .. } | Block::Paragraph { children } => {
                collect_inline_citations(children, out)
            }
            Block::BlockQuote { children } => collect_citations(children, out),
            Block::List { items, .. } => {
                for item in items {
                    collect_citations(&item.children, out);
                }
            }
            Block::Table(table) => {
                for cell in table.header.iter().chain(table.rows.iter().flatten()) {
                    out.extend(extract_citation_keys(cell));
                }
            }
            _ => {}
        }
    }
}

/// Takes the title from front-matter or, failing that, the first top-level H1.
fn take_title(blocks: &mut Vec<Block>, front_matter: &FrontMatter) -> String {
    if let Some(title) = &front_matter.title {
        return title.clone();
    }
    let first_h1 = blocks
        .iter()
        .position(|b| matches!(b, Block::Heading { level: 1, .. }));
    if let Some(index) = first_h1 {
        let heading = blocks.remove(index);
        let text = heading.inlines().map(flatten_inlines).unwrap_or_default();
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    DEFAULT_TITLE.to_string()
}

fn tag_reference_headings(blocks: &mut [Block]) {
    for block in blocks.iter_mut() {
        if let Block::Heading {
            children,
            is_reference_section,
            ..
        } = block
        {
            *is_reference_section = is_reference_heading(&flatten_inlines(children));
        }
    }
}

/// Removes the first level-2 reference heading and the list after it, and
/// returns the list's entries.
fn take_references(blocks: &mut Vec<Block>) -> Vec<String> {
    let Some(heading_index) = blocks.iter().position(|b| {
        matches!(
            b,
            Block::Heading {
                level: 2,
                is_reference_section: true,
                ..
            }
        )
    }) else {
        return Vec::new();
    };
    let Some(list_offset) = blocks[heading_index + 1..]
        .iter()
        .position(|b| matches!(b, Block::List { .. }))
    else {
        debug!("Reference heading without a following list");
        return Vec::new();
    };

    let list = blocks.remove(heading_index + 1 + list_offset);
    blocks.remove(heading_index);
    match list {
        Block::List { items, .. } => items
            .iter()
            .map(|item| flatten_blocks(&item.children).trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Parses a normalized stream into a [`Document`].
pub fn parse_normalized(source: &NormalizedSource) -> Document {
    let text = source.body_text();
    let mut builder = TreeBuilder::new(&source.tables);
    for event in Parser::new_ext(&text, Options::ENABLE_MATH) {
        builder.process(event);
    }
    let mut blocks = builder.finish();

    let front_matter = match source.front_matter.as_deref().map(parse_front_matter) {
        Some(Ok(fm)) => fm,
        Some(Err(e)) => {
            warn!("Ignoring front-matter: {}", e);
            FrontMatter::default()
        }
        None => FrontMatter::default(),
    };

    let title = take_title(&mut blocks, &front_matter);
    remove_tag_paragraphs(&mut blocks);
    tag_reference_headings(&mut blocks);

    let mut citations = Vec::new();
    collect_citations(&blocks, &mut citations);
    let references = take_references(&mut blocks);

    debug!(
        "Parsed '{}': {} blocks, {} citations, {} references",
        title,
        blocks.len(),
        citations.len(),
        references.len()
    );

    Document {
        title,
        author: front_matter.author,
        blocks,
        citations,
        references,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn test_front_matter_title_keeps_body() {
        let doc = parse_document("---\ntitle: \"X\"\n---\nHello world");
        assert_eq!(doc.title, "X");
        assert_eq!(
            doc.blocks,
            vec![Block::paragraph(vec![Inline::Text("Hello world".into())])]
        );
    }

    #[test]
    fn test_h1_becomes_title_and_is_removed() {
        let doc = parse_document("# My Paper\nBody\n# Second");
        assert_eq!(doc.title, "My Paper");
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(&doc.blocks[1], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn test_front_matter_title_wins_over_h1() {
        let doc = parse_document("---\ntitle: Front\n---\n# Heading\nBody");
        assert_eq!(doc.title, "Front");
        assert!(matches!(&doc.blocks[0], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn test_default_title_and_malformed_front_matter() {
        let doc = parse_document("---\ntitle: [oops\n---\nText");
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_front_matter_with_blank_line_is_not_body_text() {
        let doc = parse_document("---\n\ntitle: X\n---\nBody");
        assert_eq!(doc.title, "X");
        assert_eq!(
            doc.blocks,
            vec![Block::paragraph(vec![Inline::Text("Body".into())])]
        );
    }

    #[test]
    fn test_unparseable_front_matter_never_leaks_into_body() {
        let doc = parse_document("---\n: : :\n  bad: [\n---\nBody");
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(flatten_blocks(&doc.blocks), "Body");
    }

    #[test]
    fn test_author_from_front_matter() {
        let doc = parse_document("---\nauthor: [A, B]\n---\nText");
        assert_eq!(doc.author.as_deref(), Some("A, B"));
    }

    #[test]
    fn test_inline_decorations_nest() {
        let doc = parse_document("Plain **bold *both*** and `code` with $x^2$");
        let Block::Paragraph { children } = &doc.blocks[0] else {
            panic!("expected paragraph, got {:?}", doc.blocks[0]);
        };
        assert_eq!(
            children,
            &vec![
                Inline::Text("Plain ".into()),
                Inline::Strong(vec![
                    Inline::Text("bold ".into()),
                    Inline::Emphasis(vec![Inline::Text("both".into())]),
                ]),
                Inline::Text(" and ".into()),
                Inline::Code("code".into()),
                Inline::Text(" with ".into()),
                Inline::Math("x^2".into()),
            ]
        );
    }

    #[test]
    fn test_display_math_becomes_math_block() {
        let doc = parse_document("Before $$a+b$$ after");
        assert_eq!(
            doc.blocks[1],
            Block::MathBlock {
                source: "a+b".into()
            }
        );
        assert_eq!(doc.blocks.len(), 3);
    }

    #[test]
    fn test_table_placeholder_resolves() {
        let doc = parse_document("| a | b |\n|---|--:|\n| 1 |\n| 2 | 3 | 4 |");
        let Block::Table(table) = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks[0]);
        };
        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", ""], vec!["2", "3"]]);
    }

    #[test]
    fn test_tag_only_paragraphs_removed() {
        let doc = parse_document("#draft #todo\nReal #text here\n#solo");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(flatten_blocks(&doc.blocks), "Real #text here");
    }

    #[test]
    fn test_citations_in_order_with_duplicates() {
        let doc = parse_document("see [@smith2020] and [@lee99]\n- item [@smith2020]");
        assert_eq!(doc.citations, vec!["smith2020", "lee99", "smith2020"]);
    }

    #[test]
    fn test_reference_list_extraction() {
        let doc = parse_document("Body\n## REFERENCES\n- Entry one\n- Entry two");
        assert_eq!(doc.references, vec!["Entry one", "Entry two"]);
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_reference_headings_tagged_with_shared_synonyms() {
        let doc = parse_document("# Title\n# Works Cited\nText\n### Sources");
        let tagged: Vec<bool> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading {
                    is_reference_section,
                    ..
                } => Some(*is_reference_section),
                _ => None,
            })
            .collect();
        assert_eq!(tagged, vec![true, true]);
        assert!(doc.references.is_empty());
    }

    #[test]
    fn test_level_two_works_cited_extracts_list() {
        let doc = parse_document("## Works Cited\n1. First\n2. Second");
        assert_eq!(doc.references, vec!["First", "Second"]);
    }

    #[test]
    fn test_nested_and_ordered_lists() {
        let doc = parse_document("3. three\n   - nested\n4. four");
        let Block::List {
            ordered,
            start,
            items,
        } = &doc.blocks[0]
        else {
            panic!("expected list, got {:?}", doc.blocks[0]);
        };
        assert!(*ordered);
        assert_eq!(*start, 3);
        assert_eq!(items.len(), 2);
        assert!(items[0]
            .children
            .iter()
            .any(|b| matches!(b, Block::List { ordered: false, .. })));
    }

    #[test]
    fn test_code_block_and_blockquote() {
        let doc = parse_document("```python\nprint(1)\n\nprint(2)\n```\n> quoted");
        assert_eq!(
            doc.blocks[0],
            Block::CodeBlock {
                language: Some("python".into()),
                code: "print(1)\n\nprint(2)".into()
            }
        );
        assert!(matches!(&doc.blocks[1], Block::BlockQuote { children } if children.len() == 1));
    }

    #[test]
    fn test_embed_becomes_sole_image_paragraph() {
        let doc = parse_document("![[fig 1.png|Figure]]");
        assert_eq!(
            doc.blocks[0],
            Block::paragraph(vec![Inline::Image {
                src: "fig%201.png".into(),
                alt: "Figure".into()
            }])
        );
    }
}
