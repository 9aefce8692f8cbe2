//! Paginated layout of a parsed document.
//!
//! [`render_document`] walks the document tree in order and hands each block
//! to its renderer in [`nodes`]. Every renderer places text through the
//! [`flow`] engine, which wraps styled runs into lines and asks the shared
//! [`RenderContext`] for a page break whenever the next line would cross the
//! bottom margin.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Margins leave no room for content: {width:.2}pt x {height:.2}pt")]
    NoContentArea { width: f32, height: f32 },
}

pub mod context;
pub mod cursor;
pub mod document;
pub mod elements;
pub mod flow;
pub mod fonts;
pub mod grid;
pub mod nodes;
pub mod segments;

pub use context::{LayoutSettings, RenderContext};
pub use cursor::{PageCursor, PageState};
pub use document::render_document;
pub use elements::{
    GraphicElement, ImageElement, LaidOutDocument, LayoutElement, PositionedElement, RuleElement,
    TextElement,
};
pub use flow::{FlowRun, FlowSpec, RunStyle};
pub use fonts::text_width;
pub use grid::{GridLayout, ProportionalGrid};
pub use nodes::{Column, Resolvers};
pub use segments::{InlineSegment, MathKind, extract_segments};

pub use quire_types::geometry::{Rect, Size};

#[cfg(test)]
mod test_utils;
