//! One renderer per block kind.
//!
//! Each renderer takes the shared [`RenderContext`], the block, and the
//! [`Column`] it is laid out in, and leaves the cursor below what it placed.

pub mod blockquote;
pub mod code;
pub mod heading;
pub mod image;
pub mod list;
pub mod math;
pub mod paragraph;
pub mod table;

use crate::context::RenderContext;
use log::debug;
use quire_idf::Block;
use quire_traits::{ImageResolver, MathResolver};
use std::future::Future;
use std::pin::Pin;

/// The external collaborators a render awaits.
pub struct Resolvers<'r, M, I> {
    pub math: &'r M,
    pub images: &'r I,
}

impl<'r, M, I> Resolvers<'r, M, I> {
    pub fn new(math: &'r M, images: &'r I) -> Self {
        Self { math, images }
    }
}

impl<M, I> Clone for Resolvers<'_, M, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, I> Copy for Resolvers<'_, M, I> {}

/// Horizontal extent of the area a block is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Absolute x of the column's left edge.
    pub x: f32,
    pub width: f32,
}

impl Column {
    /// The page's content box between the left and right margins.
    pub fn full(ctx: &RenderContext) -> Self {
        Self {
            x: ctx.cursor.left(),
            width: ctx.cursor.content_width(),
        }
    }

    /// Narrows the column from the left.
    pub fn indented(self, by: f32) -> Self {
        let by = by.min(self.width);
        Self {
            x: self.x + by,
            width: self.width - by,
        }
    }
}

/// Renders `blocks` in order. Boxed so nested blocks can recurse.
pub fn render_blocks<'a, M, I>(
    ctx: &'a mut RenderContext,
    blocks: &'a [Block],
    column: Column,
    resolvers: Resolvers<'a, M, I>,
) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>
where
    M: MathResolver + 'a,
    I: ImageResolver + 'a,
{
    Box::pin(async move {
        for block in blocks {
            if block.is_blank_paragraph() {
                continue;
            }
            render_block(ctx, block, column, resolvers).await;
        }
    })
}

/// Dispatches one block to its renderer.
pub async fn render_block<M, I>(
    ctx: &mut RenderContext,
    block: &Block,
    column: Column,
    resolvers: Resolvers<'_, M, I>,
) where
    M: MathResolver,
    I: ImageResolver,
{
    debug!(
        "Rendering {} on page {} at y={:.2}",
        block.kind(),
        ctx.page_count(),
        ctx.cursor.y
    );
    match block {
        Block::Heading {
            level, children, ..
        } => heading::render_heading(ctx, *level, children, column, resolvers.math).await,
        Block::Paragraph { children } => {
            paragraph::render_paragraph(ctx, children, column, resolvers).await
        }
        Block::List {
            ordered,
            start,
            items,
        } => list::render_list(ctx, *ordered, *start, items, column, resolvers).await,
        Block::Table(table) => table::render_table(ctx, table, column, resolvers.math).await,
        Block::Image { src, alt } => {
            image::render_image(ctx, src, alt, column, resolvers.images).await
        }
        Block::CodeBlock { code, .. } => code::render_code(ctx, code, column),
        Block::BlockQuote { children } => {
            blockquote::render_blockquote(ctx, children, column, resolvers).await
        }
        Block::MathBlock { source } => {
            math::render_math_block(ctx, source, column, resolvers.math).await
        }
    }
}

/// Adds the profile's paragraph spacing below a block.
pub(crate) fn block_spacing(ctx: &mut RenderContext) {
    let spacing = ctx.profile().paragraph_spacing();
    if spacing > 0.0 {
        ctx.cursor.advance(spacing);
    }
}
