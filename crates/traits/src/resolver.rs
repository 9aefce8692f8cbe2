//! Interfaces to the external collaborators that turn math source and image
//! references into drawable graphics.
//!
//! Both resolvers are the only suspension points of a render. A resolver
//! returns `Ok(None)` when it cannot produce a graphic; an `Err` is treated the
//! same way by the caller, so neither outcome ever aborts the document.

use crate::resource::{ResourceError, SharedResourceData};
use std::future::{Future, ready};

/// One drawing command of a vector math graphic.
///
/// Coordinates are in points relative to the graphic's top-left corner, with
/// y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    CurveTo(f32, f32, f32, f32, f32, f32),
    Close,
    /// Fills every subpath since the previous paint operation.
    Fill,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MathGraphic {
    Vector(Vec<PathOp>),
    Raster(ResolvedImage),
}

/// A math expression sized for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMath {
    pub graphic: MathGraphic,
    pub width_pt: f32,
    pub height_pt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
        }
    }
}

/// Encoded image bytes plus their natural pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub bytes: SharedResourceData,
    pub kind: ImageKind,
    pub width_px: u32,
    pub height_px: u32,
}

pub trait MathResolver: Send + Sync {
    /// Sizes `source` (LaTeX without delimiters) as inline or display math.
    fn resolve(
        &self,
        source: &str,
        display: bool,
    ) -> impl Future<Output = Result<Option<ResolvedMath>, ResourceError>> + Send;
}

pub trait ImageResolver: Send + Sync {
    /// Loads the image an embed reference points to.
    fn resolve(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<Option<ResolvedImage>, ResourceError>> + Send;
}

/// Math resolver for hosts without a math typesetter. Every expression falls
/// back to its bracketed placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMathResolver;

impl MathResolver for UnavailableMathResolver {
    fn resolve(
        &self,
        _source: &str,
        _display: bool,
    ) -> impl Future<Output = Result<Option<ResolvedMath>, ResourceError>> + Send {
        ready(Ok(None))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableImageResolver;

impl ImageResolver for UnavailableImageResolver {
    fn resolve(
        &self,
        _reference: &str,
    ) -> impl Future<Output = Result<Option<ResolvedImage>, ResourceError>> + Send {
        ready(Ok(None))
    }
}

impl<T: MathResolver> MathResolver for &T {
    fn resolve(
        &self,
        source: &str,
        display: bool,
    ) -> impl Future<Output = Result<Option<ResolvedMath>, ResourceError>> + Send {
        (**self).resolve(source, display)
    }
}

impl<T: ImageResolver> ImageResolver for &T {
    fn resolve(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<Option<ResolvedImage>, ResourceError>> + Send {
        (**self).resolve(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_resolvers_yield_none() {
        assert_eq!(UnavailableMathResolver.resolve("x^2", true).await.unwrap(), None);
        assert_eq!(UnavailableImageResolver.resolve("a.png").await.unwrap(), None);
    }

    #[test]
    fn test_image_kind_from_mime() {
        assert_eq!(ImageKind::from_mime("IMAGE/PNG"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_mime("image/jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_mime("image/gif"), None);
        assert_eq!(ImageKind::Jpeg.mime(), "image/jpeg");
    }
}
