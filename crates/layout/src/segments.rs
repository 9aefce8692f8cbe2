//! Flattens inline trees into styled runs.

use quire_idf::Inline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathKind {
    Inline,
    Display,
}

/// A contiguous span of text sharing one set of decorations.
///
/// For math segments `text` holds the math source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineSegment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub is_code: bool,
    pub math: Option<MathKind>,
}

impl InlineSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Walks `inlines` in order, inheriting bold and italic from enclosing
/// `Strong`/`Emphasis` nodes.
pub fn extract_segments(inlines: &[Inline]) -> Vec<InlineSegment> {
    walk(inlines, false, false)
}

fn walk(inlines: &[Inline], bold: bool, italic: bool) -> Vec<InlineSegment> {
    inlines
        .iter()
        .flat_map(|node| match node {
            Inline::Text(text) => vec![InlineSegment {
                text: text.clone(),
                bold,
                italic,
                ..Default::default()
            }],
            Inline::Strong(children) => walk(children, true, italic),
            Inline::Emphasis(children) => walk(children, bold, true),
            Inline::Code(code) => vec![InlineSegment {
                text: code.clone(),
                bold,
                italic,
                is_code: true,
                math: None,
            }],
            Inline::Math(source) => vec![InlineSegment {
                text: source.clone(),
                bold,
                italic,
                is_code: false,
                math: Some(MathKind::Inline),
            }],
            // Images inside running text keep their place as alt text.
            Inline::Image { alt, .. } => vec![InlineSegment {
                text: format!("[Image: {}]", alt),
                bold,
                italic,
                ..Default::default()
            }],
        })
        .collect()
}
