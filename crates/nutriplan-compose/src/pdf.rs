//! PDF backend for [`Compositor`], built on `oxidize-pdf`.
//!
//! Base pages are rebuilt from their parsed content operators. Text, paths,
//! colors and line widths survive; embedded images and fonts of the base
//! document do not.

use std::io::Cursor;

use nutriplan_core::RenderedPage;
use oxidize_pdf::parser::{ContentOperation, ContentParser, ParsedPage, PdfDocument, PdfReader};
use oxidize_pdf::{Color, Document, Font, Image, Page};

use crate::{
    A4_HEIGHT_PT, A4_WIDTH_PT, ComposeError, Compositor, PageImage, PageInsertion, RasterOptions,
    Rasterizer,
};

const IMAGE_NAME: &str = "NutriplanPage";

impl PageImage {
    /// Wrap JPEG bytes, reading the pixel size from the header.
    pub fn from_jpeg(jpeg: Vec<u8>) -> Result<Self, ComposeError> {
        let image = Image::from_jpeg_data(jpeg.clone()).map_err(compose_error)?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            jpeg,
        })
    }
}

/// Splices full-page A4 JPEG pages into a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfCompositor;

impl PdfCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl Compositor for PdfCompositor {
    fn compose(&self, base: &[u8], insertions: &[PageInsertion]) -> Result<Vec<u8>, ComposeError> {
        let source = PdfReader::new(Cursor::new(base))
            .map_err(compose_error)?
            .into_document();
        let count = source.page_count().map_err(compose_error)?;

        let mut pages = Vec::with_capacity(count as usize + insertions.len());
        for index in 0..count {
            let parsed = source.get_page(index).map_err(compose_error)?;
            pages.push(copy_page(&source, &parsed)?);
        }
        tracing::debug!(pages = pages.len(), "base document parsed");

        for insertion in insertions {
            if insertion.index > pages.len() {
                return Err(ComposeError::Compose(format!(
                    "page index {} is past the end of a {}-page document",
                    insertion.index,
                    pages.len()
                )));
            }
            pages.insert(insertion.index, image_page(&insertion.image)?);
        }

        let mut output = Document::new();
        copy_metadata(&source, &mut output);
        for page in pages {
            output.add_page(page);
        }

        let mut bytes = Vec::new();
        output.write(&mut bytes).map_err(compose_error)?;
        Ok(bytes)
    }
}

/// Hands out images rasterized elsewhere, matched by rendered page.
#[derive(Debug, Clone, Default)]
pub struct PrerenderedPages {
    pages: Vec<(RenderedPage, PageImage)>,
}

impl PrerenderedPages {
    /// Pair every rendered page with its image, in order.
    pub fn new(
        pages: impl IntoIterator<Item = RenderedPage>,
        images: impl IntoIterator<Item = PageImage>,
    ) -> Self {
        Self {
            pages: pages.into_iter().zip(images).collect(),
        }
    }
}

impl Rasterizer for PrerenderedPages {
    fn rasterize(
        &self,
        page: &RenderedPage,
        _options: &RasterOptions,
    ) -> Result<PageImage, ComposeError> {
        self.pages
            .iter()
            .find(|(rendered, _)| rendered == page)
            .map(|(_, image)| image.clone())
            .ok_or_else(|| {
                ComposeError::Rasterize(format!("no image for the {} page", page.kind.as_str()))
            })
    }
}

fn image_page(image: &PageImage) -> Result<Page, ComposeError> {
    let mut page = Page::new(A4_WIDTH_PT, A4_HEIGHT_PT);
    let jpeg = Image::from_jpeg_data(image.jpeg.clone()).map_err(compose_error)?;
    page.add_image(IMAGE_NAME, jpeg);
    page.draw_image(IMAGE_NAME, 0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT)
        .map_err(compose_error)?;
    Ok(page)
}

fn copy_page<R>(source: &PdfDocument<R>, parsed: &ParsedPage) -> Result<Page, ComposeError>
where
    R: std::io::Read + std::io::Seek,
{
    let mut page = Page::new(parsed.width(), parsed.height());
    let streams = source
        .get_page_content_streams(parsed)
        .map_err(compose_error)?;

    for data in &streams {
        match ContentParser::parse_content(data) {
            Ok(operations) => replay(&mut page, &operations)?,
            Err(e) => tracing::warn!(error = %e, "skipping unreadable content stream"),
        }
    }
    Ok(page)
}

fn replay(page: &mut Page, operations: &[ContentOperation]) -> Result<(), ComposeError> {
    let mut in_text = false;
    let mut font = Font::Helvetica;
    let mut size = 12.0;
    let (mut x, mut y) = (0.0, 0.0);

    for operation in operations {
        match operation {
            ContentOperation::BeginText => {
                in_text = true;
                x = 0.0;
                y = 0.0;
            }
            ContentOperation::EndText => in_text = false,
            ContentOperation::SetFont(name, font_size) => {
                font = standard_font(name);
                size = f64::from(*font_size);
            }
            ContentOperation::MoveText(tx, ty) => {
                x += f64::from(*tx);
                y += f64::from(*ty);
            }
            ContentOperation::ShowText(text) if in_text && !text.is_empty() => {
                page.text()
                    .set_font(font.clone(), size)
                    .at(x, y)
                    .write(&String::from_utf8_lossy(text))
                    .map_err(compose_error)?;
            }
            ContentOperation::SaveGraphicsState => {
                page.graphics().save_state();
            }
            ContentOperation::RestoreGraphicsState => {
                page.graphics().restore_state();
            }
            ContentOperation::MoveTo(px, py) => {
                page.graphics().move_to(f64::from(*px), f64::from(*py));
            }
            ContentOperation::LineTo(px, py) => {
                page.graphics().line_to(f64::from(*px), f64::from(*py));
            }
            ContentOperation::CurveTo(x1, y1, x2, y2, x3, y3) => {
                page.graphics().curve_to(
                    f64::from(*x1),
                    f64::from(*y1),
                    f64::from(*x2),
                    f64::from(*y2),
                    f64::from(*x3),
                    f64::from(*y3),
                );
            }
            ContentOperation::ClosePath => {
                page.graphics().close_path();
            }
            ContentOperation::Rectangle(rx, ry, w, h) => {
                page.graphics().rectangle(
                    f64::from(*rx),
                    f64::from(*ry),
                    f64::from(*w),
                    f64::from(*h),
                );
            }
            ContentOperation::Stroke => {
                page.graphics().stroke();
            }
            ContentOperation::Fill => {
                page.graphics().fill();
            }
            ContentOperation::SetLineWidth(width) => {
                page.graphics().set_line_width(f64::from(*width));
            }
            ContentOperation::SetStrokingRGB(r, g, b) => {
                page.graphics().set_stroke_color(rgb(*r, *g, *b));
            }
            ContentOperation::SetNonStrokingRGB(r, g, b) => {
                page.graphics().set_fill_color(rgb(*r, *g, *b));
            }
            _ => {}
        }
    }
    Ok(())
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::rgb(f64::from(r), f64::from(g), f64::from(b))
}

fn standard_font(name: &str) -> Font {
    match name {
        "Times-Roman" => Font::TimesRoman,
        "Times-Bold" => Font::TimesBold,
        "Times-Italic" => Font::TimesItalic,
        "Times-BoldItalic" => Font::TimesBoldItalic,
        "Helvetica-Bold" => Font::HelveticaBold,
        "Helvetica-Oblique" => Font::HelveticaOblique,
        "Helvetica-BoldOblique" => Font::HelveticaBoldOblique,
        "Courier" => Font::Courier,
        "Courier-Bold" => Font::CourierBold,
        "Courier-Oblique" => Font::CourierOblique,
        "Courier-BoldOblique" => Font::CourierBoldOblique,
        _ => Font::Helvetica,
    }
}

fn copy_metadata<R>(source: &PdfDocument<R>, output: &mut Document)
where
    R: std::io::Read + std::io::Seek,
{
    let Ok(metadata) = source.metadata() else {
        return;
    };
    if let Some(title) = metadata.title {
        output.set_title(title);
    }
    if let Some(author) = metadata.author {
        output.set_author(author);
    }
}

fn compose_error(e: impl std::fmt::Display) -> ComposeError {
    ComposeError::Compose(e.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// SOI, a baseline frame header for a 16x8 RGB image, EOI.
    pub(crate) fn tiny_jpeg() -> Vec<u8> {
        vec![
            0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x08, 0x00, 0x10, 0x03, 0x01, 0x11,
            0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
        ]
    }

    /// A base document of US Letter pages, each with its number as text.
    pub(crate) fn letter_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::new();
        doc.set_title("Master");
        for n in 0..pages {
            let mut page = Page::letter();
            page.text()
                .set_font(Font::Helvetica, 24.0)
                .at(72.0, 700.0)
                .write(&format!("Base page {n}"))
                .unwrap();
            doc.add_page(page);
        }
        let mut bytes = Vec::new();
        doc.write(&mut bytes).unwrap();
        bytes
    }

    /// `true` for each A4 page, `false` for each Letter page.
    pub(crate) fn a4_layout(pdf: &[u8]) -> Vec<bool> {
        let doc = PdfReader::new(Cursor::new(pdf)).unwrap().into_document();
        (0..doc.page_count().unwrap())
            .map(|i| {
                let page = doc.get_page(i).unwrap();
                (page.width() - A4_WIDTH_PT).abs() < 1.0
            })
            .collect()
    }

    fn insertion(index: usize) -> PageInsertion {
        PageInsertion {
            index,
            image: PageImage::from_jpeg(tiny_jpeg()).unwrap(),
        }
    }

    #[test]
    fn test_page_image_reads_jpeg_size() {
        let image = PageImage::from_jpeg(tiny_jpeg()).unwrap();
        assert_eq!((image.width, image.height), (16, 8));
    }

    #[test]
    fn test_page_image_rejects_non_jpeg() {
        assert!(matches!(
            PageImage::from_jpeg(b"\x89PNG".to_vec()),
            Err(ComposeError::Compose(_))
        ));
    }

    #[test]
    fn test_inserts_at_zero_based_indices() {
        let out = PdfCompositor::new()
            .compose(&letter_pdf(4), &[insertion(1), insertion(3)])
            .unwrap();
        assert_eq!(a4_layout(&out), vec![false, true, false, true, false, false]);
    }

    #[test]
    fn test_insert_at_end() {
        let out = PdfCompositor::new()
            .compose(&letter_pdf(2), &[insertion(2)])
            .unwrap();
        assert_eq!(a4_layout(&out), vec![false, false, true]);
    }

    #[test]
    fn test_index_past_end_is_an_error() {
        let err = PdfCompositor::new()
            .compose(&letter_pdf(2), &[insertion(3)])
            .unwrap_err();
        assert!(err.to_string().contains("past the end"));
    }

    #[test]
    fn test_garbage_base_is_an_error() {
        let err = PdfCompositor::new()
            .compose(b"not a pdf", &[insertion(0)])
            .unwrap_err();
        assert!(matches!(err, ComposeError::Compose(_)));
    }

    #[test]
    fn test_prerendered_pages_match_by_page() {
        use nutriplan_core::PageKind;

        let notes = RenderedPage::new(PageKind::Notes, "<div>notes</div>");
        let diet = RenderedPage::new(PageKind::Diet, "<div>diet</div>");
        let mut wide = PageImage::from_jpeg(tiny_jpeg()).unwrap();
        wide.width = 32;
        let pages = PrerenderedPages::new(
            [notes.clone(), diet.clone()],
            [PageImage::from_jpeg(tiny_jpeg()).unwrap(), wide],
        );

        let options = RasterOptions::default();
        assert_eq!(pages.rasterize(&diet, &options).unwrap().width, 32);
        assert_eq!(pages.rasterize(&notes, &options).unwrap().width, 16);
        let other = RenderedPage::new(PageKind::BeforeAfter, "<div></div>");
        assert!(matches!(
            pages.rasterize(&other, &options),
            Err(ComposeError::Rasterize(_))
        ));
    }
}
