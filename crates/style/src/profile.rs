//! The style profile capability set and its selection.
use crate::error::StyleError;
use crate::font::{FontStyle, FontWeight};
use crate::text::TextAlign;
use crate::{ApaProfile, MlaProfile};
use std::fmt::Debug;
use std::sync::Arc;

/// Style names accepted by [`select_profile`], in the order they are reported.
pub const VALID_STYLES: &[&str] = &["apa", "mla"];

/// Font sizes and line heights, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeScale {
    pub font_size: f32,
    pub line_height: f32,
    pub code_font_size: f32,
    pub code_line_height: f32,
}

/// Type treatment for one heading depth.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingRule {
    pub align: TextAlign,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Multiples of the profile's first-line indent applied to the heading's first line.
    pub indent_level: u8,
    /// Appended to the heading text unless it already ends in punctuation.
    pub trailing_punctuation: Option<char>,
}

impl HeadingRule {
    pub fn new(align: TextAlign, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            align,
            weight,
            style,
            indent_level: 0,
            trailing_punctuation: None,
        }
    }

    pub fn indented(mut self, level: u8) -> Self {
        self.indent_level = level;
        self
    }

    pub fn ending_with(mut self, punctuation: char) -> Self {
        self.trailing_punctuation = Some(punctuation);
        self
    }

    /// Applies the trailing punctuation rule to `text`.
    pub fn decorate(&self, text: &str) -> String {
        let trimmed = text.trim();
        match self.trailing_punctuation {
            Some(p) if !trimmed.ends_with(['.', '!', '?', ':']) && !trimmed.is_empty() => {
                format!("{trimmed}{p}")
            }
            _ => trimmed.to_string(),
        }
    }
}

/// Heading rules indexed by depth (1-based), with a rule for depths past the table.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingRules {
    levels: Vec<HeadingRule>,
    fallback: HeadingRule,
}

impl HeadingRules {
    pub fn new(levels: Vec<HeadingRule>, fallback: HeadingRule) -> Self {
        Self { levels, fallback }
    }

    pub fn rule(&self, depth: u8) -> &HeadingRule {
        if depth == 0 {
            return &self.fallback;
        }
        self.levels
            .get(usize::from(depth) - 1)
            .unwrap_or(&self.fallback)
    }

    pub fn defined_depths(&self) -> usize {
        self.levels.len()
    }
}

/// How the trailing reference list is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceListRule {
    pub heading: &'static str,
    pub heading_rule: HeadingRule,
    /// Hanging indent is disabled for both supported styles.
    pub hanging_indent: bool,
    pub start_on_new_page: bool,
}

/// The capability set one citation style provides to the layout engine.
///
/// All lengths are in points.
pub trait StyleProfile: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn type_scale(&self) -> TypeScale;

    fn first_line_indent(&self) -> f32;

    fn list_indent(&self) -> f32;

    fn blockquote_indent(&self) -> f32;

    /// Extra vertical space after each paragraph-like block.
    fn paragraph_spacing(&self) -> f32;

    fn heading_rules(&self) -> &HeadingRules;

    fn title_rule(&self) -> HeadingRule;

    fn reference_list_rule(&self) -> &ReferenceListRule;

    /// Heading set above the trailing citation list.
    fn citation_heading(&self) -> &'static str;

    /// One rendered line of the trailing citation list.
    fn format_citation(&self, key: &str) -> String;

    fn heading_rule(&self, depth: u8) -> &HeadingRule {
        self.heading_rules().rule(depth)
    }
}

pub type SharedProfile = Arc<dyn StyleProfile>;

/// Selects a profile by name (case-insensitive).
pub fn select_profile(name: &str) -> Result<SharedProfile, StyleError> {
    match name.trim().to_lowercase().as_str() {
        "apa" | "apa-like" => Ok(Arc::new(ApaProfile::new())),
        "mla" | "mla-like" => Ok(Arc::new(MlaProfile::new())),
        _ => Err(StyleError::UnknownStyle {
            requested: name.to_string(),
            valid: VALID_STYLES.join(", "),
        }),
    }
}
