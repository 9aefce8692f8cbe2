use crate::context::RenderContext;
use crate::elements::{ImageElement, LayoutElement, PositionedElement};
use crate::flow::{FlowRun, FlowSpec, body_style, flow_runs};
use crate::nodes::{Column, block_spacing};
use log::warn;
use quire_traits::{ImageResolver, ResolvedImage};
use quire_types::geometry::Size;

/// Placeholder text for an image that could not be loaded.
pub fn image_placeholder(alt: &str) -> String {
    format!("[Image: {}]", alt)
}

/// Places a block image scaled to the column, breaking the page first when it
/// would not fit below the cursor.
pub async fn render_image<I: ImageResolver>(
    ctx: &mut RenderContext,
    src: &str,
    alt: &str,
    column: Column,
    images: &I,
) {
    let Some(image) = resolve_image(images, src).await else {
        let style = body_style(ctx, false, false);
        let runs = vec![FlowRun::text(image_placeholder(alt), style)];
        flow_runs(ctx, runs, &FlowSpec::column(column.x, column.width));
        block_spacing(ctx);
        return;
    };

    // One pixel maps to one point.
    let natural = Size::new(image.width_px as f32, image.height_px as f32);
    let size = natural.fit_within(Size::new(column.width, ctx.cursor.content_height()));

    ctx.ensure_room(size.height);
    let y = ctx.cursor.y;
    ctx.push(PositionedElement {
        x: column.x,
        y,
        width: size.width,
        height: size.height,
        element: LayoutElement::Image(ImageElement { image }),
    });
    ctx.cursor.advance(size.height);
    block_spacing(ctx);
}

async fn resolve_image<I: ImageResolver>(images: &I, src: &str) -> Option<ResolvedImage> {
    match images.resolve(src).await {
        Ok(Some(image)) if image.width_px > 0 && image.height_px > 0 => Some(image),
        Ok(Some(_)) => {
            warn!("Image '{}' has no pixels, using placeholder", src);
            None
        }
        Ok(None) => {
            warn!("Image '{}' could not be resolved, using placeholder", src);
            None
        }
        Err(e) => {
            warn!("Image resolver failed for '{}': {}", src, e);
            None
        }
    }
}
