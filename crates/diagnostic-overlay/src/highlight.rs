//! Range highlights (decorations) derived from diagnostics.
//!
//! Highlights are transient and revision-scoped: a rendering surface holds one highlight set per
//! `(document, layer)` and the overlay always replaces that set wholesale.

use crate::diagnostics::DiagnosticSeverity;
use std::ops::Range;

/// Style ID type (host-defined meaning, e.g. an index into a theme's text formats).
pub type StyleId = u32;

/// Built-in style id for error highlights.
pub const DIAGNOSTIC_ERROR_STYLE_ID: StyleId = 0x0400_0001;
/// Built-in style id for warning highlights (everything that is not an error).
pub const DIAGNOSTIC_WARNING_STYLE_ID: StyleId = 0x0400_0002;

/// Identifies the decoration layer highlights are written into.
///
/// Editors keep several independent highlight sets per document (search matches, code
/// warnings, ...). Replacing one layer never touches the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationLayerId(pub u32);

impl DecorationLayerId {
    /// Code warnings layer, the default target for analyzer diagnostics.
    pub const CODE_WARNINGS: Self = Self(1);
    /// Code semantics layer, for analyzers that report into a separate set.
    pub const CODE_SEMANTICS: Self = Self(2);

    /// Create a new layer id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl Default for DecorationLayerId {
    fn default() -> Self {
        Self::CODE_WARNINGS
    }
}

/// Text style bucket of a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// Error underline.
    Error,
    /// Warning underline, used for every non-error severity.
    Warning,
}

impl TextStyle {
    /// Style for a diagnostic severity; a missing severity is treated as a warning.
    pub fn for_severity(severity: Option<DiagnosticSeverity>) -> Self {
        match severity.unwrap_or(DiagnosticSeverity::Warning) {
            DiagnosticSeverity::Error => Self::Error,
            _ => Self::Warning,
        }
    }
}

/// A highlighted range in a live buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Character offsets (half-open) in the buffer the highlight was built against.
    pub range: Range<usize>,
    /// Style bucket.
    pub style: TextStyle,
    /// Resolved host style id.
    pub style_id: StyleId,
}
