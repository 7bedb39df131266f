//! Nutriplan - printable nutrition pages from Arabic diet plan text
//!
//! A coach writes (or an AI drafts) a day plan in loose Arabic text; nutriplan
//! reads it into a structured [`DietPlan`], lays it out as pages and writes
//! those pages out for printing:
//! - Keyword-driven reader that never fails, with fidelity warnings
//! - Page layout: before/after photos, notes pages, the diet page
//! - HTML, JSON and plain text writers
//! - Page export into an existing PDF
//! - AI providers that draft the plan text
//!
//! # Quick Start
//!
//! ```rust
//! use nutriplan::prelude::*;
//!
//! let plan = nutriplan::plan::parse("الغداء 200جم صدور دجاج\nسعرات 1800");
//! assert_eq!(plan.stats.get(MacroKey::Calories), Some("1800"));
//!
//! let doc = nutriplan::layout(&plan, &LayoutOptions::default()).value;
//! # #[cfg(feature = "html")]
//! # {
//! let html = nutriplan::html::emit(&doc).unwrap();
//! let html = String::from_utf8(html.value).unwrap();
//! assert!(html.contains("صدور دجاج"));
//! # }
//! ```
//!
//! # Features
//!
//! - `html` - HTML writer (default)
//! - `json` - JSON writer
//! - `plaintext` - Plain text preview writer
//! - `compose` - Page export into a base document
//! - `ai` - AI text providers
//! - `all` - Everything

// Re-export core and layout types
pub use nutriplan_layout::*;

/// Plan text reader.
pub mod plan {
    pub use nutriplan_read_plan::keywords;
    pub use nutriplan_read_plan::{SAMPLE_PLAN, normalize, parse, parse_with_report};
}

/// HTML output.
#[cfg(feature = "html")]
pub mod html {
    pub use nutriplan_write_html::{
        DEFAULT_STYLESHEET, HtmlWriter, emit, emit_full_document, emit_pages, emit_with_options,
        escape_attr, escape_html,
    };
}

/// JSON output.
#[cfg(feature = "json")]
pub mod json {
    pub use nutriplan_write_json::{JsonWriter, emit, emit_plan, emit_with_options};
}

/// Plain text output.
#[cfg(feature = "plaintext")]
pub mod plaintext {
    pub use nutriplan_write_plaintext::{PlaintextWriter, emit, emit_with_options};
}

/// Page export into a base document.
#[cfg(feature = "compose")]
pub mod compose {
    pub use nutriplan_compose::*;
}

/// AI text providers.
#[cfg(feature = "ai")]
pub mod ai {
    pub use nutriplan_ai::*;
}

/// Every enabled [`Emitter`], in a stable order.
pub fn emitters() -> Vec<Box<dyn Emitter>> {
    #[allow(unused_mut)]
    let mut emitters: Vec<Box<dyn Emitter>> = Vec::new();
    #[cfg(feature = "html")]
    emitters.push(Box::new(nutriplan_write_html::HtmlWriter));
    #[cfg(feature = "json")]
    emitters.push(Box::new(nutriplan_write_json::JsonWriter));
    #[cfg(feature = "plaintext")]
    emitters.push(Box::new(nutriplan_write_plaintext::PlaintextWriter));
    emitters
}

/// The enabled emitter for a format name.
pub fn emitter_for(format: &str) -> Option<Box<dyn Emitter>> {
    emitters()
        .into_iter()
        .find(|e| e.formats().iter().any(|f| f.eq_ignore_ascii_case(format)))
}

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        BeforeAfter, ConversionResult, DietPlan, Document, EmitOptions, LayoutOptions, MacroKey,
        MacroStats, MealEntry, Node, PageKind,
    };
    pub use crate::{builder, helpers, node, prop};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "html")]
    fn test_text_to_html() {
        let plan = plan::parse("العشاء زبادي\nبروتين 150");
        let doc = layout(&plan, &LayoutOptions::default()).value;

        let html = String::from_utf8(html::emit(&doc).unwrap().value).unwrap();

        assert!(html.contains("diet-page"));
        assert!(html.contains("زبادي"));
        assert!(html.contains("150"));
    }

    #[test]
    #[cfg(feature = "html")]
    fn test_emitter_lookup() {
        assert!(emitter_for("html").is_some());
        assert!(emitter_for("HTML").is_some());
        assert!(emitter_for("docx").is_none());
    }

    #[test]
    fn test_emitter_formats_are_unique() {
        let mut seen = Vec::new();
        for emitter in emitters() {
            for format in emitter.formats() {
                assert!(!seen.contains(&format.to_string()), "duplicate format {format}");
                seen.push(format.to_string());
            }
        }
    }
}
