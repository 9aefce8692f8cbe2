//! Positioned output of the layout engine.
//!
//! Coordinates are in points from the top-left corner of the page, y growing
//! downwards. The PDF backend flips them.

use quire_style::FontFace;
use quire_traits::{PathOp, ResolvedImage};
use quire_types::PageSize;

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Image(ImageElement),
    Graphic(GraphicElement),
    Rule(RuleElement),
}

/// A run of text in a single face. The baseline sits at `y + font_size * 0.8`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub face: FontFace,
    pub font_size: f32,
}

/// An encoded raster image drawn into the element's box.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub image: ResolvedImage,
}

/// Vector drawing ops in a `natural_width` x `natural_height` box, scaled to
/// the element's box.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicElement {
    pub ops: Vec<PathOp>,
    pub natural_width: f32,
    pub natural_height: f32,
}

/// A stroked line from `(x, y)` to `(x + width, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleElement {
    pub thickness: f32,
}

impl PositionedElement {
    pub fn text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Every page's elements, plus the document information the backend records.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub page_size: PageSize,
    pub pages: Vec<Vec<PositionedElement>>,
    pub title: String,
    pub author: Option<String>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text of every page, elements joined with spaces. Used for diagnostics and tests.
    pub fn page_texts(&self) -> Vec<String> {
        self.pages
            .iter()
            .map(|page| {
                page.iter()
                    .filter_map(PositionedElement::text)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}
