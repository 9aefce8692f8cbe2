use crate::context::RenderContext;
use crate::flow::{FlowSpec, build_runs, flow_runs};
use crate::nodes::{Column, Resolvers, block_spacing, image};
use crate::segments::extract_segments;
use quire_idf::Inline;
use quire_traits::{ImageResolver, MathResolver};

pub async fn render_paragraph<M, I>(
    ctx: &mut RenderContext,
    children: &[Inline],
    column: Column,
    resolvers: Resolvers<'_, M, I>,
) where
    M: MathResolver,
    I: ImageResolver,
{
    // An image on its own line is a block image, not inline flow.
    if let Some((src, alt)) = sole_image(children) {
        image::render_image(ctx, src, alt, column, resolvers.images).await;
        return;
    }

    let segments = extract_segments(children);
    let runs = build_runs(ctx, &segments, resolvers.math).await;
    let spec = FlowSpec::column(column.x, column.width)
        .first_line_indent(ctx.profile().first_line_indent());
    flow_runs(ctx, runs, &spec);
    block_spacing(ctx);
}

fn sole_image(children: &[Inline]) -> Option<(&str, &str)> {
    let mut visible = children.iter().filter(|c| match c {
        Inline::Text(t) => !t.trim().is_empty(),
        _ => true,
    });
    match (visible.next(), visible.next()) {
        (Some(Inline::Image { src, alt }), None) => Some((src.as_str(), alt.as_str())),
        _ => None,
    }
}
