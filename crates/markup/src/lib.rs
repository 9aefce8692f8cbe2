//! Turns markdown source into a [`quire_idf::Document`].
//!
//! Parsing runs in two stages. [`normalize`] rewrites the raw lines into a
//! canonical stream where every line is its own paragraph and tables are
//! replaced by placeholders; [`parse_normalized`] runs the CommonMark grammar
//! over that stream and layers title, tag, citation and reference handling on
//! top of the resulting tree.

pub mod citations;
pub mod error;
pub mod frontmatter;
pub mod normalize;
pub mod parser;
pub mod tables;

pub use citations::{REFERENCE_SYNONYMS, extract_citation_keys, is_reference_heading};
pub use error::ParseError;
pub use frontmatter::{FrontMatter, parse_front_matter};
pub use normalize::{NormalizedSource, TableBlock, is_table_start, normalize};
pub use parser::parse_normalized;

use quire_idf::Document;

/// Normalizes and parses `source` in one step.
pub fn parse_document(source: &str) -> Document {
    let normalized = normalize(source);
    parse_normalized(&normalized)
}
