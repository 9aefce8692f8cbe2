//! Markdown to citation-styled PDF.
//!
//! The root crate wires the workspace together: [`ExportConfig`] describes
//! the user's choices, [`PipelineBuilder`] validates them, and
//! [`ExportPipeline`] runs parse, layout and PDF writing for each source.

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::ExportConfig;
pub use error::PipelineError;
pub use pipeline::{DefaultPipeline, ExportPipeline, PipelineBuilder};

pub use quire_idf as idf;
pub use quire_layout as layout;
pub use quire_markup as markup;
pub use quire_style as style;
pub use quire_traits as traits;
