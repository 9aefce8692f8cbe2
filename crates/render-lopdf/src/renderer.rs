use crate::encoding::text_string;
use crate::page::PageContext;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use quire_layout::{LaidOutDocument, LayoutElement, PositionedElement};
use quire_render_core::{DocumentInfo, DocumentRenderer, RenderError, render_laid_out};
use quire_style::FontFace;
use quire_traits::ResolvedImage;
use quire_types::PageSize;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

const FACES: [FontFace; 12] = [
    FontFace::TimesRoman,
    FontFace::TimesBold,
    FontFace::TimesItalic,
    FontFace::TimesBoldItalic,
    FontFace::Helvetica,
    FontFace::HelveticaBold,
    FontFace::HelveticaOblique,
    FontFace::HelveticaBoldOblique,
    FontFace::Courier,
    FontFace::CourierBold,
    FontFace::CourierOblique,
    FontFace::CourierBoldOblique,
];

/// Resource name every page uses for `face`.
pub(crate) fn font_resource_name(face: FontFace) -> String {
    format!("F{}", face as usize + 1)
}

/// Identity of an image's bytes, so a picture placed twice is embedded once.
pub(crate) fn image_key(image: &ResolvedImage) -> usize {
    Arc::as_ptr(&image.bytes) as usize
}

/// An in-memory PDF renderer using the `lopdf` library.
/// It builds the document's object graph and then writes it to the output stream.
pub struct LopdfRenderer {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_size: Option<PageSize>,
    fonts: Dictionary,
    xobjects: Dictionary,
    images: HashMap<usize, String>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            page_size: None,
            fonts: Dictionary::new(),
            xobjects: Dictionary::new(),
            images: HashMap::new(),
        }
    }

    /// Embeds every image on the page that is not embedded yet.
    fn register_images(&mut self, elements: &[PositionedElement]) {
        for el in elements {
            let LayoutElement::Image(image) = &el.element else {
                continue;
            };
            let key = image_key(&image.image);
            if self.images.contains_key(&key) {
                continue;
            }
            match image_xobject(&mut self.document, &image.image) {
                Ok(stream) => {
                    let name = format!("Im{}", self.images.len() + 1);
                    let id = self.document.add_object(stream);
                    self.xobjects.set(name.as_bytes(), id);
                    self.images.insert(key, name);
                }
                Err(e) => warn!("{}", e),
            }
        }
    }
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn image_stream(width: u32, height: u32, color_space: &str, data: &[u8]) -> Result<Stream, RenderError> {
    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        deflate(data)?,
    ))
}

/// Decodes an image to 8-bit RGB and wraps it in a Flate-compressed XObject.
/// An alpha channel becomes a separate DeviceGray soft mask.
fn image_xobject(document: &mut Document, image: &ResolvedImage) -> Result<Stream, RenderError> {
    let decoded = image::load_from_memory(&image.bytes).map_err(|e| RenderError::Image(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());

    if !decoded.color().has_alpha() {
        return image_stream(width, height, "DeviceRGB", decoded.to_rgb8().as_raw());
    }

    let rgba = decoded.to_rgba8();
    let pixels = rgba.as_raw();
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(pixels.len() / 4);
    for px in pixels.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
        alpha.push(px[3]);
    }
    let mask_id = document.add_object(image_stream(width, height, "DeviceGray", &alpha)?);
    let mut stream = image_stream(width, height, "DeviceRGB", &rgb)?;
    stream.dict.set("SMask", mask_id);
    Ok(stream)
}

impl<W: Write> DocumentRenderer<W> for LopdfRenderer {
    fn begin_document(&mut self, info: &DocumentInfo, page_size: PageSize) -> Result<(), RenderError> {
        for face in FACES {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            self.fonts.set(font_resource_name(face).as_bytes(), font_id);
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        let catalog_id = self.document.add_object(catalog_dict);
        self.document.trailer.set("Root", catalog_id);

        let mut info_dict = dictionary! {
            "Title" => text_string(&info.title),
            "Producer" => Object::string_literal("quire"),
        };
        if let Some(author) = &info.author {
            info_dict.set("Author", text_string(author));
        }
        let info_id = self.document.add_object(info_dict);
        self.document.trailer.set("Info", info_id);

        self.page_size = Some(page_size);
        Ok(())
    }

    fn render_page(&mut self, elements: &[PositionedElement]) -> Result<(), RenderError> {
        let page_size = self.page_size.ok_or(RenderError::NotStarted)?;
        self.register_images(elements);

        let mut page_ctx = PageContext::new(page_size.height, &self.images);
        for element in elements {
            page_ctx.draw_element(element);
        }
        let content = page_ctx.finish();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed_content = encoder.finish()?;
        let content_stream = Stream::new(dictionary! {"Filter" => "FlateDecode"}, compressed_content);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        debug!("Wrote page {} with {} elements", self.page_ids.len(), elements.len());
        Ok(())
    }

    fn finish(mut self: Box<Self>, mut writer: W) -> Result<W, RenderError> {
        if self.page_size.is_none() {
            return Err(RenderError::NotStarted);
        }

        let mut resources = dictionary! { "Font" => std::mem::take(&mut self.fonts) };
        if !self.xobjects.is_empty() {
            resources.set("XObject", std::mem::take(&mut self.xobjects));
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i64);
        }
        self.document.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Writes `doc` as a complete PDF file.
pub fn render_pdf(doc: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
    render_laid_out(Box::new(LopdfRenderer::new()), doc, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb, Rgba};
    use quire_layout::{ImageElement, TextElement};
    use quire_traits::ImageKind;
    use std::io::Cursor;

    fn text(content: &str, y: f32) -> PositionedElement {
        PositionedElement {
            x: 72.0,
            y,
            width: 100.0,
            height: 12.0,
            element: LayoutElement::Text(TextElement {
                content: content.into(),
                face: FontFace::TimesRoman,
                font_size: 12.0,
            }),
        }
    }

    fn laid_out(pages: Vec<Vec<PositionedElement>>) -> LaidOutDocument {
        LaidOutDocument {
            page_size: PageSize::LETTER,
            pages,
            title: "Test Title".into(),
            author: Some("A. Writer".into()),
        }
    }

    fn png(width: u32, height: u32) -> ResolvedImage {
        let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(width, height, Rgb([10, 20, 30]));
        let mut bytes = Cursor::new(Vec::new());
        buffer.write_to(&mut bytes, ImageFormat::Png).unwrap();
        ResolvedImage {
            bytes: Arc::new(bytes.into_inner()),
            kind: ImageKind::Png,
            width_px: width,
            height_px: height,
        }
    }

    #[test]
    fn test_writes_one_pdf_page_per_layout_page() {
        let doc = laid_out(vec![vec![text("First", 72.0)], vec![text("Second", 72.0)]]);
        let bytes = render_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let pdf = Document::load_mem(&bytes).unwrap();
        assert_eq!(pdf.get_pages().len(), 2);
        let page_two = pdf.extract_text(&[2]).unwrap();
        assert!(page_two.contains("Second"));
    }

    #[test]
    fn test_info_dictionary_has_title_and_author() {
        let bytes = render_pdf(&laid_out(vec![vec![]])).unwrap();
        let pdf = Document::load_mem(&bytes).unwrap();
        let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = pdf.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Test Title");
        assert_eq!(info.get(b"Author").unwrap().as_str().unwrap(), b"A. Writer");
    }

    #[test]
    fn test_repeated_image_is_embedded_once() {
        let image = png(4, 3);
        let element = |y: f32| PositionedElement {
            x: 72.0,
            y,
            width: 40.0,
            height: 30.0,
            element: LayoutElement::Image(ImageElement {
                image: image.clone(),
            }),
        };
        let bytes = render_pdf(&laid_out(vec![vec![element(72.0), element(200.0)]])).unwrap();
        let pdf = Document::load_mem(&bytes).unwrap();
        let images = pdf
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| s.dict.get(b"Subtype").and_then(|v| v.as_name()).ok() == Some(b"Image".as_slice()))
            .count();
        assert_eq!(images, 1);
    }

    #[test]
    fn test_transparent_image_gets_a_soft_mask() {
        let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(2, 2, |x, _| Rgba([255, 0, 0, if x == 0 { 0 } else { 255 }]));
        let mut bytes = Cursor::new(Vec::new());
        buffer.write_to(&mut bytes, ImageFormat::Png).unwrap();
        let image = ResolvedImage {
            bytes: Arc::new(bytes.into_inner()),
            kind: ImageKind::Png,
            width_px: 2,
            height_px: 2,
        };
        let page = vec![PositionedElement {
            x: 72.0,
            y: 72.0,
            width: 20.0,
            height: 20.0,
            element: LayoutElement::Image(ImageElement { image }),
        }];
        let bytes = render_pdf(&laid_out(vec![page])).unwrap();
        let pdf = Document::load_mem(&bytes).unwrap();

        let picture = pdf
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .find(|s| s.dict.has(b"SMask"))
            .expect("image with soft mask");
        let mask_id = picture.dict.get(b"SMask").unwrap().as_reference().unwrap();
        let mask = pdf.get_object(mask_id).unwrap().as_stream().unwrap();
        assert_eq!(
            mask.dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
            b"DeviceGray"
        );
        assert_eq!(mask.get_plain_content().unwrap(), vec![0, 255, 0, 255]);
    }

    #[test]
    fn test_undecodable_image_is_skipped() {
        let broken = ResolvedImage {
            bytes: Arc::new(vec![1, 2, 3]),
            kind: ImageKind::Png,
            width_px: 1,
            height_px: 1,
        };
        let page = vec![PositionedElement {
            x: 72.0,
            y: 72.0,
            width: 10.0,
            height: 10.0,
            element: LayoutElement::Image(ImageElement { image: broken }),
        }];
        assert!(render_pdf(&laid_out(vec![page])).is_ok());
    }

    #[test]
    fn test_page_before_begin_is_rejected() {
        let mut renderer = LopdfRenderer::new();
        let result = DocumentRenderer::<Vec<u8>>::render_page(&mut renderer, &[]);
        assert!(matches!(result, Err(RenderError::NotStarted)));
    }
}
