use crate::context::{LayoutSettings, RenderContext};
use crate::elements::{LayoutElement, PositionedElement, TextElement};
use quire_style::{ApaProfile, FontFace, MlaProfile};
use quire_traits::{
    ImageKind, ImageResolver, MathGraphic, MathResolver, PathOp, ResolvedImage, ResolvedMath,
    ResourceError,
};
use std::future::{Future, ready};
use std::sync::Arc;

/// A fresh context on a US Letter page with one-inch margins.
pub fn apa_context() -> RenderContext {
    RenderContext::new(&LayoutSettings::default(), Arc::new(ApaProfile::new()))
}

pub fn mla_context() -> RenderContext {
    RenderContext::new(&LayoutSettings::default(), Arc::new(MlaProfile::new()))
}

pub fn text_element(content: &str, x: f32, y: f32) -> PositionedElement {
    PositionedElement {
        x,
        y,
        width: 10.0,
        height: 12.0,
        element: LayoutElement::Text(TextElement {
            content: content.to_string(),
            face: FontFace::TimesRoman,
            font_size: 12.0,
        }),
    }
}

/// Text content of every text element on a page, in placement order.
pub fn texts(page: &[PositionedElement]) -> Vec<&str> {
    page.iter().filter_map(PositionedElement::text).collect()
}

/// Resolves every expression to a filled box of a fixed size.
pub struct FixedMath {
    width: f32,
    height: f32,
}

impl FixedMath {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl MathResolver for FixedMath {
    fn resolve(
        &self,
        _source: &str,
        _display: bool,
    ) -> impl Future<Output = Result<Option<ResolvedMath>, ResourceError>> + Send {
        let (w, h) = (self.width, self.height);
        ready(Ok(Some(ResolvedMath {
            graphic: MathGraphic::Vector(vec![
                PathOp::MoveTo(0.0, 0.0),
                PathOp::LineTo(w, 0.0),
                PathOp::LineTo(w, h),
                PathOp::Close,
                PathOp::Fill,
            ]),
            width_pt: w,
            height_pt: h,
        })))
    }
}

pub struct FailingMath;

impl MathResolver for FailingMath {
    fn resolve(
        &self,
        source: &str,
        _display: bool,
    ) -> impl Future<Output = Result<Option<ResolvedMath>, ResourceError>> + Send {
        ready(Err(ResourceError::InvalidFormat(source.to_string())))
    }
}

/// Resolves every reference to an image of a fixed pixel size. The bytes are
/// never decoded by the layout engine.
pub struct FixedImage {
    width_px: u32,
    height_px: u32,
}

impl FixedImage {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

impl ImageResolver for FixedImage {
    fn resolve(
        &self,
        _reference: &str,
    ) -> impl Future<Output = Result<Option<ResolvedImage>, ResourceError>> + Send {
        ready(Ok(Some(ResolvedImage {
            bytes: Arc::new(vec![0u8; 4]),
            kind: ImageKind::Png,
            width_px: self.width_px,
            height_px: self.height_px,
        })))
    }
}

pub struct FailingImage;

impl ImageResolver for FailingImage {
    fn resolve(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<Option<ResolvedImage>, ResourceError>> + Send {
        ready(Err(ResourceError::NotFound(reference.to_string())))
    }
}
