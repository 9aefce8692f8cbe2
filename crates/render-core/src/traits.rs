use crate::error::RenderError;
use quire_layout::{LaidOutDocument, PositionedElement};
use quire_types::PageSize;
use std::io::Write;

/// Metadata recorded in the output's document information.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: Option<String>,
}

/// A backend that writes laid-out pages, in order, to `W`.
pub trait DocumentRenderer<W: Write> {
    fn begin_document(&mut self, info: &DocumentInfo, page_size: PageSize) -> Result<(), RenderError>;

    fn render_page(&mut self, elements: &[PositionedElement]) -> Result<(), RenderError>;

    fn finish(self: Box<Self>, writer: W) -> Result<W, RenderError>;
}

/// Drives `renderer` over every page of `doc`.
pub fn render_laid_out<W: Write>(
    mut renderer: Box<dyn DocumentRenderer<W>>,
    doc: &LaidOutDocument,
    writer: W,
) -> Result<W, RenderError> {
    let info = DocumentInfo {
        title: doc.title.clone(),
        author: doc.author.clone(),
    };
    renderer.begin_document(&info, doc.page_size)?;
    for page in &doc.pages {
        renderer.render_page(page)?;
    }
    renderer.finish(writer)
}
