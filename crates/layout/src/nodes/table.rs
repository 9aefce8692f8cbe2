//! Tables laid out on a proportional grid.
//!
//! Cell text is wrapped with the same line breaker as body text, confined to
//! the cell. Inline `$...$` math in cells is resolved once per distinct
//! source before any row is placed.

use crate::context::RenderContext;
use crate::elements::{LayoutElement, PositionedElement, RuleElement};
use crate::flow::{
    FlowRun, Line, RunStyle, body_style, break_lines, line_elements, math_placeholder,
    resolve_math, tokenize,
};
use crate::grid::{CELL_PADDING, GridLayout, ProportionalGrid};
use crate::nodes::{Column, block_spacing};
use log::debug;
use quire_idf::TableNode;
use quire_style::TextAlign;
use quire_traits::{MathResolver, ResolvedMath};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Cell line height as a multiple of the font size.
const TABLE_LINE_FACTOR: f32 = 1.25;
const RULE_THICKNESS: f32 = 0.5;

static CELL_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$]+)\$").expect("BUG: invalid cell math regex literal"));

/// Resolved math for one table, keyed by source. `None` marks a source that
/// failed and renders as a placeholder.
pub type MathCache = HashMap<String, Option<ResolvedMath>>;

pub async fn render_table<M: MathResolver>(
    ctx: &mut RenderContext,
    table: &TableNode,
    column: Column,
    math: &M,
) {
    let columns = table.column_count();
    if columns == 0 {
        return;
    }

    let cache = resolve_cell_math(table, math).await;
    let font_size = ctx.type_scale().font_size;
    let widths = ProportionalGrid.column_widths(table, column.width, ctx.face(false, false), font_size);
    let table_width: f32 = widths.iter().sum();
    let grid = Grid {
        column,
        widths: &widths,
        alignments: &table.alignments,
        cache: &cache,
    };
    debug!(
        "Table with {} columns and {} rows, widths {:?}",
        columns,
        table.rows.len(),
        widths
    );

    let header_style = cell_style(ctx, true);
    let body_style = cell_style(ctx, false);

    let header = grid.layout_row(&table.header, header_style);
    ctx.ensure_room(header.height);
    push_rule(ctx, column.x, table_width);
    place_row(ctx, &header);
    push_rule(ctx, column.x, table_width);

    for row in &table.rows {
        let laid_out = grid.layout_row(row, body_style);
        if ctx.ensure_room(laid_out.height) {
            push_rule(ctx, column.x, table_width);
        }
        place_row(ctx, &laid_out);
    }
    if !table.rows.is_empty() {
        push_rule(ctx, column.x, table_width);
    }
    block_spacing(ctx);
}

/// Resolves every distinct `$...$` source in the table, in order of first
/// appearance.
pub async fn resolve_cell_math<M: MathResolver>(table: &TableNode, math: &M) -> MathCache {
    let mut cache = MathCache::new();
    let cells = table.header.iter().chain(table.rows.iter().flatten());
    for cell in cells {
        for caps in CELL_MATH_RE.captures_iter(cell) {
            let source = caps[1].trim();
            if source.is_empty() || cache.contains_key(source) {
                continue;
            }
            let resolved = resolve_math(math, source, false).await;
            cache.insert(source.to_string(), resolved);
        }
    }
    cache
}

fn cell_style(ctx: &RenderContext, bold: bool) -> RunStyle {
    let mut style = body_style(ctx, bold, false);
    style.line_height = style.font_size * TABLE_LINE_FACTOR;
    style
}

/// Splits cell text into text runs and cached math runs.
pub fn cell_runs(text: &str, style: RunStyle, cache: &MathCache) -> Vec<FlowRun> {
    let mut runs = Vec::new();
    let mut last = 0;
    for caps in CELL_MATH_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            runs.push(FlowRun::text(&text[last..whole.start()], style));
        }
        let source = caps[1].trim();
        match cache.get(source) {
            Some(Some(math)) => runs.push(FlowRun::Math {
                math: math.clone(),
                style,
            }),
            _ => runs.push(FlowRun::text(math_placeholder(source), style)),
        }
        last = whole.end();
    }
    if last < text.len() {
        runs.push(FlowRun::text(&text[last..], style));
    }
    runs
}

struct Grid<'a> {
    column: Column,
    widths: &'a [f32],
    alignments: &'a [TextAlign],
    cache: &'a MathCache,
}

struct CellLines {
    x: f32,
    width: f32,
    align: TextAlign,
    lines: Vec<Line>,
}

struct RowLayout {
    cells: Vec<CellLines>,
    height: f32,
}

impl Grid<'_> {
    fn layout_row(&self, cells: &[String], style: RunStyle) -> RowLayout {
        let mut x = self.column.x;
        let mut laid_out = Vec::with_capacity(self.widths.len());
        let mut height = style.line_height;

        for (i, width) in self.widths.iter().enumerate() {
            let text = cells.get(i).map(|c| c.trim()).unwrap_or_default();
            let inner = (width - 2.0 * CELL_PADDING).max(0.0);
            let tokens = tokenize(&cell_runs(text, style, self.cache));
            let lines = break_lines(&tokens, 0.0, 0.0, inner, style.line_height);
            let cell_height: f32 = lines.iter().map(|l| l.height).sum();
            height = height.max(cell_height);
            laid_out.push(CellLines {
                x: x + CELL_PADDING,
                width: inner,
                align: self.alignments.get(i).copied().unwrap_or_default(),
                lines,
            });
            x += width;
        }

        RowLayout {
            cells: laid_out,
            height: height + 2.0 * CELL_PADDING,
        }
    }
}

fn place_row(ctx: &mut RenderContext, row: &RowLayout) {
    let top = ctx.cursor.y + CELL_PADDING;
    for cell in &row.cells {
        let mut y = top;
        for line in &cell.lines {
            for element in line_elements(line, cell.x, y, cell.width, cell.align) {
                ctx.push(element);
            }
            y += line.height;
        }
    }
    ctx.cursor.advance(row.height);
}

fn push_rule(ctx: &mut RenderContext, x: f32, width: f32) {
    let y = ctx.cursor.y;
    ctx.push(PositionedElement {
        x,
        y,
        width,
        height: 0.0,
        element: LayoutElement::Rule(RuleElement {
            thickness: RULE_THICKNESS,
        }),
    });
}
