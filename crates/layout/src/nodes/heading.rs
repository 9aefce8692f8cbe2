use crate::context::RenderContext;
use crate::flow::{FlowSpec, build_runs, flow_runs};
use crate::nodes::Column;
use crate::segments::{InlineSegment, extract_segments};
use quire_idf::Inline;
use quire_style::{FontStyle, FontWeight, HeadingRule};
use quire_traits::MathResolver;

pub async fn render_heading<M: MathResolver>(
    ctx: &mut RenderContext,
    level: u8,
    children: &[Inline],
    column: Column,
    math: &M,
) {
    let rule = ctx.profile().heading_rule(level).clone();
    render_with_rule(ctx, &rule, children, column, math).await;
}

/// Sets `children` as a heading under `rule`. Also used for the title and the
/// trailing list headings.
pub async fn render_with_rule<M: MathResolver>(
    ctx: &mut RenderContext,
    rule: &HeadingRule,
    children: &[Inline],
    column: Column,
    math: &M,
) {
    let segments = heading_segments(rule, children);
    let runs = build_runs(ctx, &segments, math).await;
    let indent = f32::from(rule.indent_level) * ctx.profile().first_line_indent();
    let spec = FlowSpec::column(column.x, column.width)
        .first_line_indent(indent)
        .aligned(rule.align);
    flow_runs(ctx, runs, &spec);
}

/// Segments of the heading with the rule's weight and style forced on, and
/// its trailing punctuation appended.
fn heading_segments(rule: &HeadingRule, children: &[Inline]) -> Vec<InlineSegment> {
    let bold = rule.weight == FontWeight::Bold;
    let italic = rule.style == FontStyle::Italic;
    let mut segments = extract_segments(children);
    for segment in &mut segments {
        segment.bold |= bold;
        segment.italic |= italic;
    }

    if let Some(last) = segments.last_mut()
        && last.math.is_none()
    {
        let trimmed = last.text.trim_end().len();
        last.text.truncate(trimmed);
    }

    let text: String = segments.iter().map(|s| s.text.as_str()).collect();
    let decorated = rule.decorate(&text);
    if let Some(punctuation) = rule.trailing_punctuation
        && decorated.len() > text.trim().len()
    {
        segments.push(InlineSegment {
            text: punctuation.to_string(),
            bold,
            italic,
            ..Default::default()
        });
    }
    segments
}
