use crate::context::RenderContext;
use crate::flow::{FlowSpec, build_runs, flow_runs};
use crate::nodes::{Column, Resolvers, block_spacing, render_blocks};
use crate::segments::extract_segments;
use quire_idf::{Block, ListItem};
use quire_traits::{ImageResolver, MathResolver};

pub const BULLET: &str = "\u{2022} ";

/// Marker placed before the item at `index` (0-based).
pub fn item_prefix(ordered: bool, start: u64, index: usize) -> String {
    if ordered {
        format!("{}. ", start + index as u64)
    } else {
        BULLET.to_string()
    }
}

/// Renders each item one list indent in from `column`. Wrapped lines return
/// to the marker's x; nested lists indent again from the item's column.
pub async fn render_list<M, I>(
    ctx: &mut RenderContext,
    ordered: bool,
    start: u64,
    items: &[ListItem],
    column: Column,
    resolvers: Resolvers<'_, M, I>,
) where
    M: MathResolver,
    I: ImageResolver,
{
    let item_column = column.indented(ctx.profile().list_indent());
    for (index, item) in items.iter().enumerate() {
        let prefix = item_prefix(ordered, start, index);
        render_item(ctx, item, prefix, item_column, resolvers).await;
    }
    block_spacing(ctx);
}

async fn render_item<M, I>(
    ctx: &mut RenderContext,
    item: &ListItem,
    prefix: String,
    column: Column,
    resolvers: Resolvers<'_, M, I>,
) where
    M: MathResolver,
    I: ImageResolver,
{
    let spec = FlowSpec::column(column.x, column.width).with_prefix(prefix);
    let rest = match item.children.split_first() {
        Some((Block::Paragraph { children }, rest)) => {
            let segments = extract_segments(children);
            let runs = build_runs(ctx, &segments, resolvers.math).await;
            flow_runs(ctx, runs, &spec);
            rest
        }
        // The marker gets a line of its own when the item opens with another block.
        _ => {
            flow_runs(ctx, Vec::new(), &spec);
            item.children.as_slice()
        }
    };
    render_blocks(ctx, rest, column, resolvers).await;
}
