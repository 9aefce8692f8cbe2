//! Lays out a whole document: title, body blocks in order, then the trailing
//! citation and reference lists.

use crate::LayoutError;
use crate::context::{LayoutSettings, RenderContext};
use crate::elements::LaidOutDocument;
use crate::flow::{FlowRun, FlowSpec, body_style, flow_runs};
use crate::nodes::{Column, Resolvers, heading, render_block};
use log::{debug, info};
use quire_idf::{Block, Document, Inline};
use quire_style::SharedProfile;
use quire_traits::{ImageResolver, MathResolver};

/// Lays out `doc` on pages described by `settings`, under `profile`.
///
/// Math and image resolution are awaited one at a time in document order.
/// Unresolvable content degrades to placeholders; the only error is page
/// geometry that leaves no room for content.
pub async fn render_document<M, I>(
    doc: &Document,
    profile: SharedProfile,
    settings: &LayoutSettings,
    math: &M,
    images: &I,
) -> Result<LaidOutDocument, LayoutError>
where
    M: MathResolver,
    I: ImageResolver,
{
    settings.validate()?;
    info!(
        "Laying out '{}' ({} blocks) with the {} profile",
        doc.title,
        doc.blocks.len(),
        profile.name()
    );

    let mut ctx = RenderContext::new(settings, profile);
    let resolvers = Resolvers::new(math, images);
    let column = Column::full(&ctx);

    let title_rule = ctx.profile().title_rule();
    let title = [Inline::Text(doc.title.clone())];
    heading::render_with_rule(&mut ctx, &title_rule, &title, column, math).await;

    for block in &doc.blocks {
        if block.is_blank_paragraph() {
            continue;
        }
        if matches!(
            block,
            Block::Heading {
                is_reference_section: true,
                ..
            }
        ) && !ctx.is_page_empty()
        {
            debug!("Starting reference section on a new page");
            ctx.page_break();
        }
        render_block(&mut ctx, block, column, resolvers).await;
    }

    render_citations(&mut ctx, &doc.citations, column, math).await;
    render_references(&mut ctx, &doc.references, column, math).await;

    let pages = ctx.into_pages();
    info!(
        "Laid out {} pages with {} citations and {} references",
        pages.len(),
        doc.citations.len(),
        doc.references.len()
    );
    Ok(LaidOutDocument {
        page_size: settings.page,
        pages,
        title: doc.title.clone(),
        author: doc.author.clone(),
    })
}

/// One line per citation key, in collection order, under the profile's
/// citation heading.
async fn render_citations<M: MathResolver>(
    ctx: &mut RenderContext,
    citations: &[String],
    column: Column,
    math: &M,
) {
    if citations.is_empty() {
        return;
    }
    let rule = ctx.profile().reference_list_rule().heading_rule.clone();
    let heading = [Inline::Text(ctx.profile().citation_heading().to_string())];
    heading::render_with_rule(ctx, &rule, &heading, column, math).await;

    let style = body_style(ctx, false, false);
    for key in citations {
        let line = ctx.profile().format_citation(key);
        flow_runs(ctx, vec![FlowRun::text(line, style)], &FlowSpec::column(column.x, column.width));
    }
}

async fn render_references<M: MathResolver>(
    ctx: &mut RenderContext,
    references: &[String],
    column: Column,
    math: &M,
) {
    if references.is_empty() {
        return;
    }
    let rule = ctx.profile().reference_list_rule().clone();
    if rule.start_on_new_page && !ctx.is_page_empty() {
        ctx.page_break();
    }
    let heading = [Inline::Text(rule.heading.to_string())];
    heading::render_with_rule(ctx, &rule.heading_rule, &heading, column, math).await;

    let style = body_style(ctx, false, false);
    let mut spec = FlowSpec::column(column.x, column.width);
    if rule.hanging_indent {
        spec.rest_x = ctx.profile().first_line_indent();
    }
    for entry in references {
        flow_runs(ctx, vec![FlowRun::text(entry.clone(), style)], &spec);
    }
}
