//! Page export for nutriplan.
//!
//! Rendered pages are rasterized and spliced into an existing multi-page
//! document (the "base"). The before/after page goes right after the cover;
//! the nutrition pages go after a configurable page.
//!
//! Rasterizing and document editing sit behind the [`Rasterizer`] and
//! [`Compositor`] traits. [`PdfCompositor`] edits PDF bases;
//! [`PrerenderedPages`] serves page images rasterized outside this crate.
//! The crate also owns the placement rules, the session holding the base
//! document, and output naming.

mod error;
mod pdf;
mod plan;
mod raster;
mod session;

pub use error::ComposeError;
pub use pdf::{PdfCompositor, PrerenderedPages};
pub use plan::{
    BEFORE_AFTER_INDEX, DEFAULT_INSERT_AFTER, InsertionPlan, PlannedPage, normalize_insert_after,
    parse_insert_after,
};
pub use raster::{
    A4_HEIGHT_PT, A4_WIDTH_PT, Compositor, PageImage, PageInsertion, RasterOptions, Rasterizer,
};
pub use session::{ExportOptions, ExportOutput, ExportSession, output_file_name};
