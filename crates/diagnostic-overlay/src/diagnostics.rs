//! Diagnostic data model.
//!
//! Diagnostics are produced by an external analyzer (usually a language server) and are treated
//! as structured but opaque input. Positions use analyzer coordinates:
//! - zero-based line numbers
//! - zero-based character columns, counted in UTF-16 code units (the LSP default)
//!
//! Mapping these coordinates onto a live buffer is the job of [`crate::document::TextBuffer`].

/// A position in diagnostic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DiagnosticPosition {
    /// Line number (0-based).
    pub line: u32,
    /// Character offset within the line (UTF-16 code units, 0-based).
    pub character: u32,
}

impl DiagnosticPosition {
    /// Create a new position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A half-open range (`start..end`) in diagnostic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiagnosticRange {
    /// Range start position (inclusive).
    pub start: DiagnosticPosition,
    /// Range end position (exclusive).
    pub end: DiagnosticPosition,
}

impl DiagnosticRange {
    /// Create a new range.
    pub fn new(start: DiagnosticPosition, end: DiagnosticPosition) -> Self {
        Self { start, end }
    }

    /// Create a range from `(line, character)` pairs.
    pub fn from_coords(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(
            DiagnosticPosition::new(start.0, start.1),
            DiagnosticPosition::new(end.0, end.1),
        )
    }

    /// A zero-length range at `position` (a caret without selection).
    pub fn point(position: DiagnosticPosition) -> Self {
        Self::new(position, position)
    }

    /// Returns `true` if the range has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this range ends before `other` starts.
    ///
    /// When either range is empty, touching endpoints count as overlapping, so a caret placed
    /// directly at the start or end of a diagnostic still hits it.
    pub fn is_left_of(&self, other: &DiagnosticRange) -> bool {
        if self.is_empty() || other.is_empty() {
            self.end < other.start
        } else {
            self.end <= other.start
        }
    }

    /// Check if two ranges overlap.
    pub fn overlaps(&self, other: &DiagnosticRange) -> bool {
        !self.is_left_of(other) && !other.is_left_of(self)
    }
}

/// Diagnostic severity levels.
///
/// Variants are declared from most to least severe, so ascending order puts errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

impl DiagnosticSeverity {
    /// Returns `true` for [`DiagnosticSeverity::Error`].
    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

/// A single analyzer-reported issue.
///
/// Two diagnostics are equal when their range, message and severity are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Diagnostic range in analyzer coordinates.
    pub range: DiagnosticRange,
    /// Optional severity. Call sites pick their own default when it is missing.
    pub severity: Option<DiagnosticSeverity>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic without a severity.
    pub fn new(range: DiagnosticRange, message: impl Into<String>) -> Self {
        Self {
            range,
            severity: None,
            message: message.into(),
        }
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = Some(severity);
        self
    }
}
