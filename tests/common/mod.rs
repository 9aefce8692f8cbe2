pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quire::layout::LaidOutDocument;
use quire::traits::{UnavailableImageResolver, UnavailableMathResolver};
use quire::{PipelineBuilder, PipelineError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

#[allow(dead_code)]
impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based like PDF page numbers.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// A string entry of the document information dictionary.
    pub fn info(&self, key: &str) -> Option<String> {
        pdf_assertions::info_string(&self.doc, key)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Export markdown with the default configuration and no external resources.
#[allow(dead_code)]
pub async fn export_markdown(source: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    export_with(PipelineBuilder::new(), source).await
}

/// Export markdown through a configured builder, without math or image resolvers.
#[allow(dead_code)]
pub async fn export_with(
    builder: PipelineBuilder,
    source: &str,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = builder.build_with(UnavailableMathResolver, UnavailableImageResolver)?;
    let bytes = pipeline.export(source).await?;
    GeneratedPdf::from_bytes(bytes)
}

/// Lay out markdown with the default configuration, stopping before the PDF stage.
#[allow(dead_code)]
pub async fn layout_markdown(source: &str) -> Result<LaidOutDocument, PipelineError> {
    layout_with(PipelineBuilder::new(), source).await
}

#[allow(dead_code)]
pub async fn layout_with(
    builder: PipelineBuilder,
    source: &str,
) -> Result<LaidOutDocument, PipelineError> {
    let pipeline = builder.build_with(UnavailableMathResolver, UnavailableImageResolver)?;
    pipeline.layout(source).await
}
