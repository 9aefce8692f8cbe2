//! APA-like rules: double spacing, half-inch indents, five heading levels.
use crate::font::{FontStyle, FontWeight};
use crate::profile::{HeadingRule, HeadingRules, ReferenceListRule, StyleProfile, TypeScale};
use crate::text::TextAlign;

const HALF_INCH: f32 = 36.0;

#[derive(Debug, Clone)]
pub struct ApaProfile {
    headings: HeadingRules,
    references: ReferenceListRule,
}

impl ApaProfile {
    pub fn new() -> Self {
        let bold = FontWeight::Bold;
        let normal = FontStyle::Normal;
        let italic = FontStyle::Italic;
        let headings = HeadingRules::new(
            vec![
                HeadingRule::new(TextAlign::Center, bold, normal),
                HeadingRule::new(TextAlign::Left, bold, normal),
                HeadingRule::new(TextAlign::Left, bold, italic),
                HeadingRule::new(TextAlign::Left, bold, normal)
                    .indented(1)
                    .ending_with('.'),
                HeadingRule::new(TextAlign::Left, bold, italic)
                    .indented(1)
                    .ending_with('.'),
            ],
            HeadingRule::new(TextAlign::Left, bold, normal),
        );
        let references = ReferenceListRule {
            heading: "References",
            heading_rule: HeadingRule::new(TextAlign::Center, bold, normal),
            hanging_indent: false,
            start_on_new_page: true,
        };
        Self {
            headings,
            references,
        }
    }
}

impl Default for ApaProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleProfile for ApaProfile {
    fn name(&self) -> &'static str {
        "apa"
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
        HALF_INCH
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
        HeadingRule::new(TextAlign::Center, FontWeight::Bold, FontStyle::Normal)
    }

    fn reference_list_rule(&self) -> &ReferenceListRule {
        &self.references
    }

    fn citation_heading(&self) -> &'static str {
        "Citations"
    }

    fn format_citation(&self, key: &str) -> String {
        format!("({key})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_four_headings_are_indented_run_in() {
        let apa = ApaProfile::new();
        let rule = apa.heading_rule(4);
        assert_eq!(rule.indent_level, 1);
        assert_eq!(rule.decorate("Participants"), "Participants.");
    }

    #[test]
    fn test_depth_six_falls_back_to_flush_left_bold() {
        let apa = ApaProfile::new();
        let rule = apa.heading_rule(6);
        assert_eq!(rule.align, TextAlign::Left);
        assert_eq!(rule.weight, FontWeight::Bold);
        assert_eq!(rule.trailing_punctuation, None);
    }

    #[test]
    fn test_double_spaced() {
        let scale = ApaProfile::new().type_scale();
        assert_eq!(scale.line_height, 2.0 * scale.font_size);
    }
}
