use log::{debug, warn};
use quire_traits::{
    ImageKind, ImageResolver, ResolvedImage, ResourceError, ResourceProvider,
};
use std::future::{Future, ready};

/// Resolves embed references through a [`ResourceProvider`], sniffing the
/// encoding and natural pixel size from the bytes.
#[derive(Debug)]
pub struct ProviderImageResolver<P: ResourceProvider> {
    provider: P,
}

impl<P: ResourceProvider> ProviderImageResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn resolve_now(&self, reference: &str) -> Result<Option<ResolvedImage>, ResourceError> {
        if reference.contains("://") {
            warn!("Remote image '{}' is not supported, using placeholder", reference);
            return Ok(None);
        }
        let path = decode_reference(reference);
        let bytes = match self.provider.load(&path) {
            Ok(bytes) => bytes,
            Err(ResourceError::NotFound(_)) => {
                warn!("Image '{}' not found via {}", path, self.provider.name());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let kind = match image::guess_format(&bytes) {
            Ok(image::ImageFormat::Png) => ImageKind::Png,
            Ok(image::ImageFormat::Jpeg) => ImageKind::Jpeg,
            Ok(other) => {
                return Err(ResourceError::InvalidFormat(format!(
                    "{}: unsupported image format {:?}",
                    path, other
                )));
            }
            Err(e) => return Err(ResourceError::InvalidFormat(format!("{}: {}", path, e))),
        };
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| ResourceError::InvalidFormat(format!("{}: {}", path, e)))?;
        debug!(
            "Resolved image '{}' ({:?}, {}x{})",
            path,
            kind,
            decoded.width(),
            decoded.height()
        );

        Ok(Some(ResolvedImage {
            bytes,
            kind,
            width_px: decoded.width(),
            height_px: decoded.height(),
        }))
    }
}

impl<P: ResourceProvider> ImageResolver for ProviderImageResolver<P> {
    fn resolve(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<Option<ResolvedImage>, ResourceError>> + Send {
        ready(self.resolve_now(reference))
    }
}

/// Decodes `%XX` escapes in an embed target. A target that does not decode
/// to UTF-8 is used as written.
pub fn decode_reference(reference: &str) -> String {
    match urlencoding::decode(reference) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!("Embed target '{}' is not valid percent-encoding: {}", reference, e);
            reference.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use quire_traits::InMemoryResourceProvider;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(width, height, Rgb([200, 10, 10]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_reference() {
        assert_eq!(decode_reference("my%20figure.png"), "my figure.png");
        assert_eq!(decode_reference("plain.png"), "plain.png");
        assert_eq!(decode_reference("bad%FF.png"), "bad%FF.png");
    }

    #[tokio::test]
    async fn test_resolves_png_size() {
        let provider = InMemoryResourceProvider::new();
        provider.add("my figure.png", png_bytes(40, 20)).unwrap();
        let resolver = ProviderImageResolver::new(provider);

        let image = resolver.resolve("my%20figure.png").await.unwrap().unwrap();
        assert_eq!(image.kind, ImageKind::Png);
        assert_eq!((image.width_px, image.height_px), (40, 20));
    }

    #[tokio::test]
    async fn test_missing_image_is_none() {
        let resolver = ProviderImageResolver::new(InMemoryResourceProvider::new());
        assert!(resolver.resolve("absent.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_an_error() {
        let provider = InMemoryResourceProvider::new();
        provider.add("bad.png", b"not an image".to_vec()).unwrap();
        let resolver = ProviderImageResolver::new(provider);
        assert!(matches!(
            resolver.resolve("bad.png").await,
            Err(ResourceError::InvalidFormat(_))
        ));
    }
}
