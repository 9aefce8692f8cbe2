//! Greedy word wrapping of styled runs, with page breaks between lines.
//!
//! Runs are split into word and whitespace tokens, measured, and packed into
//! lines by [`break_lines`]. [`place_lines`] then positions the lines at the
//! cursor, checking before every line whether it still fits on the page.

use crate::context::RenderContext;
use crate::elements::{GraphicElement, ImageElement, LayoutElement, PositionedElement, TextElement};
use crate::fonts::text_width;
use crate::segments::{InlineSegment, MathKind};
use log::warn;
use quire_style::{FontFace, TextAlign};
use quire_traits::{MathGraphic, MathResolver, ResolvedMath};

/// Share of the font size above the baseline, matching the PDF backend.
pub const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStyle {
    pub face: FontFace,
    pub font_size: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowRun {
    Text { text: String, style: RunStyle },
    Math { math: ResolvedMath, style: RunStyle },
}

impl FlowRun {
    pub fn text(text: impl Into<String>, style: RunStyle) -> Self {
        FlowRun::Text {
            text: text.into(),
            style,
        }
    }
}

/// Where and how a block of runs is flowed.
///
/// `first_x` and `rest_x` are offsets from `origin_x`; a line may extend to
/// `origin_x + max_width`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSpec {
    pub origin_x: f32,
    pub first_x: f32,
    pub rest_x: f32,
    pub max_width: f32,
    pub align: TextAlign,
    /// Placed before the first run, starting exactly at `first_x`.
    pub prefix: Option<String>,
}

impl FlowSpec {
    pub fn column(origin_x: f32, max_width: f32) -> Self {
        Self {
            origin_x,
            first_x: 0.0,
            rest_x: 0.0,
            max_width,
            align: TextAlign::Left,
            prefix: None,
        }
    }

    pub fn first_line_indent(mut self, indent: f32) -> Self {
        self.first_x = indent;
        self
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Word(String),
    Space(String),
    Math(ResolvedMath),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub style: RunStyle,
    pub width: f32,
    pub height: f32,
}

impl Token {
    fn is_space(&self) -> bool {
        matches!(self.kind, TokenKind::Space(_))
    }
}

/// Splits text runs on whitespace boundaries, keeping the whitespace tokens.
pub fn tokenize(runs: &[FlowRun]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for run in runs {
        match run {
            FlowRun::Text { text, style } => {
                let mut current = String::new();
                let mut in_space = false;
                for c in text.chars() {
                    let c = if c == '\n' || c == '\r' { ' ' } else { c };
                    let is_space = c.is_whitespace();
                    if is_space != in_space && !current.is_empty() {
                        tokens.push(text_token(std::mem::take(&mut current), in_space, *style));
                    }
                    in_space = is_space;
                    current.push(c);
                }
                if !current.is_empty() {
                    tokens.push(text_token(current, in_space, *style));
                }
            }
            FlowRun::Math { math, style } => tokens.push(Token {
                kind: TokenKind::Math(math.clone()),
                style: *style,
                width: math.width_pt,
                height: math.height_pt,
            }),
        }
    }
    tokens
}

fn text_token(text: String, is_space: bool, style: RunStyle) -> Token {
    let width = text_width(&text, style.face, style.font_size);
    let kind = if is_space {
        TokenKind::Space(text)
    } else {
        TokenKind::Word(text)
    };
    Token {
        kind,
        style,
        width,
        height: style.line_height,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub token: Token,
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub items: Vec<LineItem>,
    pub start_x: f32,
    /// x just past the last item.
    pub end_x: f32,
    /// Tallest item on the line.
    pub height: f32,
}

impl Line {
    fn new(start_x: f32) -> Self {
        Self {
            items: Vec::new(),
            start_x,
            end_x: start_x,
            height: 0.0,
        }
    }

    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|item| match &item.token.kind {
                TokenKind::Word(t) | TokenKind::Space(t) => t.as_str(),
                TokenKind::Math(_) => "",
            })
            .collect()
    }

    fn push(&mut self, token: Token, x: f32) {
        self.end_x = x + token.width;
        self.height = self.height.max(token.height);
        self.items.push(LineItem { token, x });
    }

    fn finish(mut self, min_height: f32) -> Self {
        while self.items.last().is_some_and(|i| i.token.is_space()) {
            self.items.pop();
        }
        self.end_x = self
            .items
            .last()
            .map(|i| i.x + i.token.width)
            .unwrap_or(self.start_x);
        self.height = self
            .items
            .iter()
            .map(|i| i.token.height)
            .fold(min_height, f32::max);
        self
    }
}

/// Packs tokens into lines no wider than `max_width`.
///
/// A token that would cross `max_width` starts a new line unless the current
/// line is still empty, so a single oversized word is placed at the line
/// start and overflows instead of looping. Whitespace at the start of a
/// wrapped line is dropped.
pub fn break_lines(
    tokens: &[Token],
    first_x: f32,
    rest_x: f32,
    max_width: f32,
    min_line_height: f32,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::new(first_x);
    let mut x = first_x;

    for token in tokens {
        let overflows = x + token.width > max_width;
        if token.is_space() {
            if current.items.is_empty() && !lines.is_empty() {
                continue;
            }
            if overflows && !current.items.is_empty() {
                lines.push(std::mem::replace(&mut current, Line::new(rest_x)).finish(min_line_height));
                x = rest_x;
                continue;
            }
        } else if overflows && !current.items.is_empty() {
            lines.push(std::mem::replace(&mut current, Line::new(rest_x)).finish(min_line_height));
            x = rest_x;
        }
        current.push(token.clone(), x);
        x += token.width;
    }

    if !current.items.is_empty() {
        let line = current.finish(min_line_height);
        if !line.items.is_empty() || lines.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Builds the elements of one line whose box starts at `(origin_x, top)`.
pub fn line_elements(
    line: &Line,
    origin_x: f32,
    top: f32,
    max_width: f32,
    align: TextAlign,
) -> Vec<PositionedElement> {
    let content_width = line.end_x - line.start_x;
    let start = match align {
        TextAlign::Left => line.start_x,
        TextAlign::Center => ((max_width - content_width) / 2.0).max(0.0),
        TextAlign::Right => (max_width - content_width).max(0.0),
    };
    let shift = start - line.start_x;

    // Baseline from the tallest text on the line, half-leading below it.
    let baseline = line
        .items
        .iter()
        .filter(|i| !matches!(i.token.kind, TokenKind::Math(_)))
        .map(|i| {
            let s = &i.token.style;
            top + line.height - (s.line_height - s.font_size) / 2.0 - s.font_size * (1.0 - ASCENT)
        })
        .fold(None, |acc: Option<f32>, b| Some(acc.map_or(b, |a| a.min(b))));

    let mut elements: Vec<PositionedElement> = Vec::new();
    for item in &line.items {
        let x = origin_x + item.x + shift;
        match &item.token.kind {
            TokenKind::Word(text) | TokenKind::Space(text) => {
                let style = item.token.style;
                let y = top + line.height
                    - (style.line_height - style.font_size) / 2.0
                    - style.font_size;
                if let Some(PositionedElement {
                    element: LayoutElement::Text(prev),
                    width,
                    y: prev_y,
                    ..
                }) = elements.last_mut()
                    && prev.face == style.face
                    && prev.font_size == style.font_size
                    && *prev_y == y
                {
                    prev.content.push_str(text);
                    *width += item.token.width;
                    continue;
                }
                elements.push(PositionedElement {
                    x,
                    y,
                    width: item.token.width,
                    height: style.font_size,
                    element: LayoutElement::Text(TextElement {
                        content: text.clone(),
                        face: style.face,
                        font_size: style.font_size,
                    }),
                });
            }
            TokenKind::Math(math) => {
                let y = match baseline {
                    Some(b) => (b + item.token.style.font_size * (1.0 - ASCENT) - math.height_pt).max(top),
                    None => top + (line.height - math.height_pt) / 2.0,
                };
                elements.push(math_element(math, x, y, math.width_pt, math.height_pt));
            }
        }
    }
    elements
}

/// Positions a resolved math graphic in the given box.
pub fn math_element(math: &ResolvedMath, x: f32, y: f32, width: f32, height: f32) -> PositionedElement {
    let element = match &math.graphic {
        MathGraphic::Vector(ops) => LayoutElement::Graphic(GraphicElement {
            ops: ops.clone(),
            natural_width: math.width_pt,
            natural_height: math.height_pt,
        }),
        MathGraphic::Raster(image) => LayoutElement::Image(ImageElement {
            image: image.clone(),
        }),
    };
    PositionedElement {
        x,
        y,
        width,
        height,
        element,
    }
}

/// Places `lines` at the cursor, breaking the page before any line that would
/// cross the bottom margin. Leaves the cursor at the bottom of the last line.
pub fn place_lines(ctx: &mut RenderContext, lines: &[Line], spec: &FlowSpec) {
    for line in lines {
        ctx.ensure_room(line.height);
        let top = ctx.cursor.y;
        for element in line_elements(line, spec.origin_x, top, spec.max_width, spec.align) {
            ctx.push(element);
        }
        ctx.cursor.advance(line.height);
    }
}

/// Body text style for the context's font, with the given decorations.
pub fn body_style(ctx: &RenderContext, bold: bool, italic: bool) -> RunStyle {
    let scale = ctx.type_scale();
    RunStyle {
        face: ctx.face(bold, italic),
        font_size: scale.font_size,
        line_height: scale.line_height,
    }
}

/// The Text-Flow Engine entry point: wraps `runs` (after the optional prefix)
/// and places them at the cursor.
pub fn flow_runs(ctx: &mut RenderContext, runs: Vec<FlowRun>, spec: &FlowSpec) {
    let base = body_style(ctx, false, false);
    let mut all = Vec::with_capacity(runs.len() + 1);
    if let Some(prefix) = &spec.prefix {
        all.push(FlowRun::text(prefix.clone(), base));
    }
    all.extend(runs);

    let tokens = tokenize(&all);
    let lines = break_lines(&tokens, spec.first_x, spec.rest_x, spec.max_width, base.line_height);
    place_lines(ctx, &lines, spec);
}

/// Placeholder text for math that could not be resolved.
pub fn math_placeholder(source: &str) -> String {
    format!("[Math: {}]", source)
}

/// Resolves a math source, logging and swallowing resolver failures.
pub async fn resolve_math<M: MathResolver>(math: &M, source: &str, display: bool) -> Option<ResolvedMath> {
    match math.resolve(source, display).await {
        Ok(Some(resolved)) if resolved.width_pt > 0.0 && resolved.height_pt > 0.0 => Some(resolved),
        Ok(Some(_)) => {
            warn!("Math '{}' resolved to an empty graphic, using placeholder", source);
            None
        }
        Ok(None) => {
            warn!("Math '{}' could not be resolved, using placeholder", source);
            None
        }
        Err(e) => {
            warn!("Math resolver failed for '{}': {}", source, e);
            None
        }
    }
}

/// Turns segments into measured runs, resolving math in order.
pub async fn build_runs<M: MathResolver>(
    ctx: &RenderContext,
    segments: &[InlineSegment],
    math: &M,
) -> Vec<FlowRun> {
    let mut runs = Vec::with_capacity(segments.len());
    for segment in segments {
        let mut style = body_style(ctx, segment.bold, segment.italic);
        match segment.math {
            Some(kind) => {
                let source = segment.text.trim();
                match resolve_math(math, source, kind == MathKind::Display).await {
                    Some(resolved) => runs.push(FlowRun::Math {
                        math: resolved,
                        style,
                    }),
                    None => runs.push(FlowRun::text(math_placeholder(source), style)),
                }
            }
            None => {
                if segment.is_code {
                    style.face = ctx.code_face(segment.bold, segment.italic);
                }
                runs.push(FlowRun::text(segment.text.clone(), style));
            }
        }
    }
    runs
}
