use crate::context::RenderContext;
use crate::flow::{FlowRun, FlowSpec, body_style, flow_runs, math_element, math_placeholder, resolve_math};
use crate::nodes::{Column, block_spacing};
use quire_style::TextAlign;
use quire_traits::MathResolver;
use quire_types::geometry::Size;

/// Centers a display equation in the column, in a box at least one line tall.
pub async fn render_math_block<M: MathResolver>(
    ctx: &mut RenderContext,
    source: &str,
    column: Column,
    math: &M,
) {
    let source = source.trim();
    let line_height = ctx.type_scale().line_height;

    match resolve_math(math, source, true).await {
        Some(resolved) => {
            let natural = Size::new(resolved.width_pt, resolved.height_pt);
            let size = natural.fit_within(Size::new(column.width, ctx.cursor.content_height()));
            let box_height = size.height.max(line_height);

            ctx.ensure_room(box_height);
            let x = column.x + (column.width - size.width) / 2.0;
            let y = ctx.cursor.y + (box_height - size.height) / 2.0;
            ctx.push(math_element(&resolved, x, y, size.width, size.height));
            ctx.cursor.advance(box_height);
        }
        None => {
            let style = body_style(ctx, false, false);
            let runs = vec![FlowRun::text(math_placeholder(source), style)];
            let spec = FlowSpec::column(column.x, column.width).aligned(TextAlign::Center);
            flow_runs(ctx, runs, &spec);
        }
    }
    block_spacing(ctx);
}
