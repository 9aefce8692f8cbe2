//! Core rendering abstractions.
//!
//! This crate provides the seam between the layout engine and an output
//! backend:
//! - `DocumentRenderer` trait for writing laid-out pages
//! - `RenderError` for backend failures

mod error;
mod traits;

pub use error::RenderError;
pub use traits::{DocumentInfo, DocumentRenderer, render_laid_out};
