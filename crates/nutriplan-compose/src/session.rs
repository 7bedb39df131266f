//! Export session: the loaded base document and the export operation.

use std::path::Path;

use chrono::NaiveDateTime;
use nutriplan_core::{PageKind, RenderedPage};

use crate::{
    ComposeError, Compositor, DEFAULT_INSERT_AFTER, InsertionPlan, PageInsertion, RasterOptions,
    Rasterizer, normalize_insert_after,
};

/// Options for [`ExportSession::export`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Page after which nutrition pages go.
    pub insert_after: usize,
    pub raster: RasterOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            insert_after: DEFAULT_INSERT_AFTER,
            raster: RasterOptions::default(),
        }
    }
}

impl ExportOptions {
    /// Set the insertion point; zero selects the default.
    pub fn with_insert_after(mut self, page: usize) -> Self {
        self.insert_after = normalize_insert_after(Some(page));
        self
    }

    /// Set the raster options.
    pub fn with_raster(mut self, raster: RasterOptions) -> Self {
        self.raster = raster;
        self
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    pub bytes: Vec<u8>,
    /// Suggested file name, `NutritionPlan_<date>_<HH-MM>.pdf`.
    pub file_name: String,
}

/// Holds the base document between exports.
///
/// The base stays loaded until replaced, so several exports can reuse it.
#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    base: Option<Vec<u8>>,
    base_name: Option<String>,
}

impl ExportSession {
    /// Create a session with no base document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load base document bytes, replacing any previous base.
    pub fn load_base(&mut self, bytes: Vec<u8>, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(name = %name, size = bytes.len(), "base document loaded");
        self.base = Some(bytes);
        self.base_name = Some(name);
    }

    /// Read the base document from a file.
    ///
    /// On error the previously loaded base is kept.
    pub fn load_base_file(&mut self, path: impl AsRef<Path>) -> Result<(), ComposeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.load_base(bytes, name);
        Ok(())
    }

    /// Check if a base document is loaded.
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Name of the loaded base document.
    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }

    /// Rasterize `pages` and splice them into the base document.
    ///
    /// Fails before doing any work when no base is loaded or there are no
    /// pages.
    pub fn export(
        &self,
        pages: &[RenderedPage],
        rasterizer: &dyn Rasterizer,
        compositor: &dyn Compositor,
        options: &ExportOptions,
        now: NaiveDateTime,
    ) -> Result<ExportOutput, ComposeError> {
        let base = self.base.as_deref().ok_or(ComposeError::MissingBaseDocument)?;
        if pages.is_empty() {
            return Err(ComposeError::NoPages);
        }

        let kinds: Vec<PageKind> = pages.iter().map(|p| p.kind).collect();
        let plan = InsertionPlan::new(&kinds, options.insert_after);
        if plan.len() < pages.len() {
            tracing::warn!(
                skipped = pages.len() - plan.len(),
                "only the first before/after page is exported"
            );
        }

        let total = plan.len();
        tracing::info!(total, insert_after = options.insert_after, "processing pages");

        let mut insertions = Vec::with_capacity(total);
        for (n, planned) in plan.pages.iter().enumerate() {
            let page = &pages[planned.source];
            tracing::info!(
                page = n + 1,
                total,
                kind = page.kind.as_str(),
                index = planned.index,
                "rasterizing page"
            );
            let image = rasterizer.rasterize(page, &options.raster)?;
            insertions.push(PageInsertion {
                index: planned.index,
                image,
            });
        }

        let bytes = compositor.compose(base, &insertions)?;
        let file_name = output_file_name(&now);
        tracing::info!(file = %file_name, size = bytes.len(), "export finished");

        Ok(ExportOutput { bytes, file_name })
    }
}

/// `NutritionPlan_<YYYY-MM-DD>_<HH-MM>.pdf` for the given time.
pub fn output_file_name(now: &NaiveDateTime) -> String {
    format!("NutritionPlan_{}.pdf", now.format("%Y-%m-%d_%H-%M"))
}
