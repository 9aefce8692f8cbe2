// src/error.rs
use quire_layout::LayoutError;
use quire_render_core::RenderError;
use quire_style::StyleError;
use thiserror::Error;

/// Everything that can stop an export. Content problems inside the document
/// never show up here; they degrade to placeholders during layout.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid style configuration: {0}")]
    Style(#[from] StyleError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export configuration is not valid JSON: {0}")]
    Config(#[from] serde_json::Error),
}
