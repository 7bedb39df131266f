//! Fidelity tracking - know what the reader dropped or the writer skipped.

use crate::MacroKey;

/// Result of a conversion step, including fidelity warnings.
#[derive(Debug)]
pub struct ConversionResult<T> {
    /// The conversion output.
    pub value: T,
    /// Notes about input that was dropped or output that was simplified.
    pub warnings: Vec<FidelityWarning>,
}

impl<T> ConversionResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<FidelityWarning>) -> Self {
        Self { value, warnings }
    }

    /// Add a warning.
    pub fn warn(mut self, warning: FidelityWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ConversionResult<U> {
        ConversionResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// A warning about input or output that did not make it through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FidelityWarning {
    pub severity: Severity,
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
    /// Zero-based index into the normalized lines, when known.
    pub line: Option<usize>,
}

impl FidelityWarning {
    /// Create a new warning.
    pub fn new(severity: Severity, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            line: None,
        }
    }

    /// Set the source line.
    pub fn at(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Severity of a fidelity warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Information only, nothing visible changed.
    Info,
    /// Some input text does not appear in the output.
    Minor,
}

/// Kind of fidelity issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// A content line appeared before any meal title and was dropped.
    DroppedContent(String),
    /// A macro label had no number on its line or the next one.
    MissingMacroValue(MacroKey),
    /// A notes section had no content and produced no page.
    EmptyNotes(String),
    /// A node kind the writer does not know; its children were emitted.
    UnsupportedNode(String),
    /// A node referenced a resource missing from the document.
    MissingResource(String),
}
