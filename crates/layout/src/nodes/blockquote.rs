use crate::context::RenderContext;
use crate::elements::{LayoutElement, PositionedElement, RuleElement};
use crate::nodes::{Column, Resolvers, render_blocks};
use quire_idf::Block;
use quire_traits::{ImageResolver, MathResolver};

/// Gap between the quote rule and the quoted text.
pub const RULE_OFFSET: f32 = 6.0;
pub const RULE_THICKNESS: f32 = 1.0;

/// Renders `children` one blockquote indent in, with a vertical rule beside
/// them on every page they cover.
pub async fn render_blockquote<M, I>(
    ctx: &mut RenderContext,
    children: &[Block],
    column: Column,
    resolvers: Resolvers<'_, M, I>,
) where
    M: MathResolver,
    I: ImageResolver,
{
    let inner = column.indented(ctx.profile().blockquote_indent());
    ctx.ensure_room(ctx.type_scale().line_height);
    let (mut start_page, mut start_y) = (ctx.page_index(), ctx.cursor.y);
    let placed_before = ctx.element_count(start_page);

    render_blocks(ctx, children, inner, resolvers).await;

    let (end_page, end_y) = (ctx.page_index(), ctx.cursor.y);
    // The first child broke the page before placing anything.
    if end_page > start_page && ctx.element_count(start_page) == placed_before {
        start_page += 1;
        start_y = ctx.cursor.top();
    }
    let x = inner.x - RULE_OFFSET;
    for page in start_page..=end_page {
        let top = if page == start_page { start_y } else { ctx.cursor.top() };
        let bottom = if page == end_page {
            end_y
        } else {
            ctx.cursor.usable_bottom()
        };
        if bottom > top {
            ctx.push_to_page(
                page,
                PositionedElement {
                    x,
                    y: top,
                    width: 0.0,
                    height: bottom - top,
                    element: LayoutElement::Rule(RuleElement {
                        thickness: RULE_THICKNESS,
                    }),
                },
            );
        }
    }
}
