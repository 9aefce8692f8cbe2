use crate::encoding::to_win_ansi;
use crate::renderer::{font_resource_name, image_key};
use log::warn;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use quire_layout::{
    GraphicElement, ImageElement, LayoutElement, PositionedElement, RuleElement, TextElement,
};
use quire_style::FontFace;
use quire_traits::PathOp;
use std::collections::HashMap;

/// Share of the font size above the baseline.
const ASCENT: f32 = 0.8;

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    line_width: Option<f32>,
}

/// Draws one page's elements into a content stream, flipping layout
/// coordinates (top-left origin) into PDF space (bottom-left origin).
pub(crate) struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    images: &'a HashMap<usize, String>,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(page_height: f32, images: &'a HashMap<usize, String>) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            images,
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    pub(crate) fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Image(image) => self.draw_image(image, el),
            LayoutElement::Graphic(graphic) => self.draw_graphic(graphic, el),
            LayoutElement::Rule(rule) => self.draw_rule(rule, el),
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.op(
                "Tf",
                vec![Object::Name(font_resource_name(face).into_bytes()), size.into()],
            );
            self.state.font = Some((face, size));
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        self.set_font(text.face, text.font_size);
        let baseline_y = el.y + text.font_size * ASCENT;
        let pdf_y = self.page_height - baseline_y;
        self.op("Td", vec![el.x.into(), pdf_y.into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn draw_rule(&mut self, rule: &RuleElement, el: &PositionedElement) {
        if self.state.line_width != Some(rule.thickness) {
            self.op("w", vec![rule.thickness.into()]);
            self.state.line_width = Some(rule.thickness);
        }
        let y1 = self.page_height - el.y;
        let y2 = self.page_height - (el.y + el.height);
        self.op("m", vec![el.x.into(), y1.into()]);
        self.op("l", vec![(el.x + el.width).into(), y2.into()]);
        self.op("S", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) {
        let Some(name) = self.images.get(&image_key(&image.image)).cloned() else {
            warn!("Skipping image that could not be embedded");
            return;
        };
        let pdf_y = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                el.width.into(),
                0.into(),
                0.into(),
                el.height.into(),
                el.x.into(),
                pdf_y.into(),
            ],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
    }

    /// Path coordinates are scaled from the graphic's natural box to the
    /// element's box, with y flipped by the transform.
    fn draw_graphic(&mut self, graphic: &GraphicElement, el: &PositionedElement) {
        if graphic.natural_width <= 0.0 || graphic.natural_height <= 0.0 {
            return;
        }
        let sx = el.width / graphic.natural_width;
        let sy = el.height / graphic.natural_height;
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                sx.into(),
                0.into(),
                0.into(),
                (-sy).into(),
                el.x.into(),
                (self.page_height - el.y).into(),
            ],
        );
        for op in &graphic.ops {
            match *op {
                PathOp::MoveTo(x, y) => self.op("m", vec![x.into(), y.into()]),
                PathOp::LineTo(x, y) => self.op("l", vec![x.into(), y.into()]),
                PathOp::CurveTo(x1, y1, x2, y2, x3, y3) => self.op(
                    "c",
                    vec![
                        x1.into(),
                        y1.into(),
                        x2.into(),
                        y2.into(),
                        x3.into(),
                        y3.into(),
                    ],
                ),
                PathOp::Close => self.op("h", vec![]),
                PathOp::Fill => self.op("f", vec![]),
            }
        }
        self.op("Q", vec![]);
    }
}
