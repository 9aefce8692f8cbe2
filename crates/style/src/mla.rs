//! MLA-like rules: double spacing, flush-left headings, "Works Cited" trailer.
use crate::font::{FontStyle, FontWeight};
use crate::profile::{HeadingRule, HeadingRules, ReferenceListRule, StyleProfile, TypeScale};
use crate::text::TextAlign;

const HALF_INCH: f32 = 36.0;

#[derive(Debug, Clone)]
pub struct MlaProfile {
    headings: HeadingRules,
    references: ReferenceListRule,
}

impl MlaProfile {
    pub fn new() -> Self {
        let headings = HeadingRules::new(
            vec![
                HeadingRule::new(TextAlign::Left, FontWeight::Bold, FontStyle::Normal),
                HeadingRule::new(TextAlign::Left, FontWeight::Regular, FontStyle::Italic),
                HeadingRule::new(TextAlign::Center, FontWeight::Bold, FontStyle::Normal),
            ],
            HeadingRule::new(TextAlign::Left, FontWeight::Regular, FontStyle::Normal),
        );
        let references = ReferenceListRule {
            heading: "Works Cited",
            heading_rule: HeadingRule::new(TextAlign::Center, FontWeight::Regular, FontStyle::Normal),
            hanging_indent: false,
            start_on_new_page: true,
        };
        Self {
            headings,
            references,
        }
    }
}

impl Default for MlaProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleProfile for MlaProfile {
    fn name(&self) -> &'static str {
        "mla"
    }

    fn type_scale(&self) -> TypeScale {
        TypeScale {
            font_size: 12.0,
            line_height: 24.0,
            code_font_size: 10.0,
            code_line_height: 12.0,
        }
    }

    fn first_line_indent(&self) -> f32 {
        HALF_INCH
    }

    fn list_indent(&self) -> f32 {
        HALF_INCH / 2.0
    }

    fn blockquote_indent(&self) -> f32 {
        HALF_INCH
    }

    fn paragraph_spacing(&self) -> f32 {
        0.0
    }

    fn heading_rules(&self) -> &HeadingRules {
        &self.headings
    }

    fn title_rule(&self) -> HeadingRule {
        HeadingRule::new(TextAlign::Center, FontWeight::Regular, FontStyle::Normal)
    }

    fn reference_list_rule(&self) -> &ReferenceListRule {
        &self.references
    }

    fn citation_heading(&self) -> &'static str {
        "Citations"
    }

    fn format_citation(&self, key: &str) -> String {
        format!("{key}.")
    }
}
