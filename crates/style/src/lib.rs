//! Typographic rules for the supported citation styles.
//!
//! A [`StyleProfile`] is the capability set the layout engine consults for every
//! indentation, spacing, and heading decision. Two interchangeable variants ship
//! with the crate, [`ApaProfile`] and [`MlaProfile`]; [`select_profile`] picks one
//! by name once per render.

pub mod apa;
pub mod dimension;
pub mod error;
pub mod font;
pub mod mla;
pub mod profile;
pub mod text;

pub use apa::ApaProfile;
pub use dimension::{Margins, MarginsInches};
pub use error::StyleError;
pub use font::{FontChoice, FontFace, FontStyle, FontWeight};
pub use mla::MlaProfile;
pub use profile::{
    HeadingRule, HeadingRules, ReferenceListRule, SharedProfile, StyleProfile, TypeScale,
    select_profile, VALID_STYLES,
};
pub use text::TextAlign;
