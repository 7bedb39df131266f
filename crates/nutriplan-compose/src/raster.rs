//! Page rasterizing and page splicing seams.

use nutriplan_core::RenderedPage;

use crate::ComposeError;

/// A4 width in PDF points.
pub const A4_WIDTH_PT: f64 = 595.28;
/// A4 height in PDF points.
pub const A4_HEIGHT_PT: f64 = 841.89;

/// Options for [`Rasterizer::rasterize`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Device pixels per CSS pixel.
    pub scale: f32,
    /// JPEG quality in `0.0..=1.0`.
    pub jpeg_quality: f32,
    /// CSS `url()` target drawn behind the page while rasterizing.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            jpeg_quality: 0.85,
            background: None,
        }
    }
}

impl RasterOptions {
    /// Set the scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the JPEG quality, clamped to `0.0..=1.0`.
    pub fn with_jpeg_quality(mut self, quality: f32) -> Self {
        self.jpeg_quality = quality.clamp(0.0, 1.0);
        self
    }

    /// Draw an image behind the page.
    pub fn with_background(mut self, url: impl Into<String>) -> Self {
        self.background = Some(url.into());
        self
    }
}

/// A rasterized page, encoded as JPEG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub jpeg: Vec<u8>,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

/// A page image to insert at a 0-based page position, filling a full A4 page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInsertion {
    pub index: usize,
    pub image: PageImage,
}

/// Turns one rendered page into an image.
pub trait Rasterizer {
    fn rasterize(
        &self,
        page: &RenderedPage,
        options: &RasterOptions,
    ) -> Result<PageImage, ComposeError>;
}

/// Inserts full-page images into a base document.
///
/// Insertions are applied in slice order, each against the document as left
/// by the previous one.
pub trait Compositor {
    fn compose(&self, base: &[u8], insertions: &[PageInsertion]) -> Result<Vec<u8>, ComposeError>;
}
