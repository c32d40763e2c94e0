//! Collaborator interfaces for open documents.
//!
//! The overlay never owns buffers. The editor subsystem exposes them through:
//! - [`DocumentId`]: the file identity diagnostics are reported against
//! - [`TextBuffer`]: read access sufficient to resolve analyzer positions
//! - [`DocumentHost`]: lookup of open buffers and their current revision

use crate::diagnostics::{DiagnosticPosition, DiagnosticRange};
use crate::line_index::LineIndex;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// File identity of a document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(PathBuf);

impl DocumentId {
    /// Create a document id from a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The underlying path.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for DocumentId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for DocumentId {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// Read access to a live text buffer.
pub trait TextBuffer {
    /// Resolve an analyzer position into a character offset.
    ///
    /// Must return `None` (never panic) when the position lies outside the buffer.
    fn resolve_position(&self, position: DiagnosticPosition) -> Option<usize>;

    /// Size of the buffer in bytes (UTF-8).
    fn byte_len(&self) -> usize;

    /// Resolve both ends of `range` into an ordered character-offset range.
    fn resolve_range(&self, range: &DiagnosticRange) -> Option<Range<usize>> {
        let start = self.resolve_position(range.start)?;
        let end = self.resolve_position(range.end)?;
        Some(start.min(end)..start.max(end))
    }
}

impl TextBuffer for LineIndex {
    fn resolve_position(&self, position: DiagnosticPosition) -> Option<usize> {
        LineIndex::resolve_position(self, position)
    }

    fn byte_len(&self) -> usize {
        self.byte_count()
    }
}

/// The editor subsystem as seen by the overlay: open buffers and their revisions.
pub trait DocumentHost {
    /// Buffer type of open documents.
    type Buffer: TextBuffer;

    /// The open buffer for `document`, or `None` if no editor shows it.
    fn buffer(&self, document: &DocumentId) -> Option<&Self::Buffer>;

    /// The current revision of `document`, or `None` if it is not tracked.
    fn revision(&self, document: &DocumentId) -> Option<i32>;

    /// Whether `document` belongs to the project the analyzer serves.
    fn belongs_to_project(&self, document: &DocumentId) -> bool {
        let _ = document;
        true
    }
}
