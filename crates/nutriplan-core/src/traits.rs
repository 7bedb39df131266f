//! Emitter trait, its options and errors.

use crate::{ConversionResult, Document};

/// Options for emitting.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Pretty-print output where applicable.
    pub pretty: bool,
    /// Wrap the pages in a complete standalone document.
    pub full_document: bool,
    /// Stylesheet replacing the built-in one in full documents.
    pub stylesheet: Option<String>,
    /// CSS `url()` target drawn behind every page (a path or `data:` URI).
    pub background: Option<String>,
}

impl EmitOptions {
    /// Request a complete standalone document.
    pub fn full_document(mut self) -> Self {
        self.full_document = true;
        self
    }

    /// Request pretty-printed output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Use a custom stylesheet.
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = Some(css.into());
        self
    }

    /// Draw an image behind every page.
    pub fn with_background(mut self, url: impl Into<String>) -> Self {
        self.background = Some(url.into());
        self
    }
}

/// Error during emitting.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("document has no diet plan attached")]
    MissingPlan,
    #[error("serialization failed: {0}")]
    Serialize(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Emit a page document to an output format.
pub trait Emitter: Send + Sync {
    /// Format names this emitter produces.
    fn formats(&self) -> &[&str];

    /// Emit a document to bytes.
    fn emit(
        &self,
        doc: &Document,
        options: &EmitOptions,
    ) -> Result<ConversionResult<Vec<u8>>, EmitError>;
}
