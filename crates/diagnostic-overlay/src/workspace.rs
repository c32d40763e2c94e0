//! In-memory set of open documents.
//!
//! A headless host needs somewhere to keep the live buffers the overlay renders against. This
//! module provides a small [`Workspace`] that owns, per [`DocumentId`]:
//! - the buffer text (a rope-backed [`LineIndex`])
//! - the document revision, bumped on every edit
//! - whether the document belongs to the current project
//!
//! It implements [`DocumentHost`] so it can be handed straight to a
//! [`DiagnosticManager`](crate::DiagnosticManager).

use crate::document::{DocumentHost, DocumentId};
use crate::line_index::LineIndex;
use std::collections::HashMap;
use thiserror::Error;

struct DocumentEntry {
    index: LineIndex,
    revision: i32,
    in_project: bool,
}

/// Workspace-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// A document with this id is already open.
    #[error("document already open: {0}")]
    AlreadyOpen(DocumentId),
    /// A document id was not found.
    #[error("document not open: {0}")]
    NotOpen(DocumentId),
}

/// Open documents with their revisions.
#[derive(Default)]
pub struct Workspace {
    documents: HashMap<DocumentId, DocumentEntry>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns `true` if `document` is open.
    pub fn is_open(&self, document: &DocumentId) -> bool {
        self.documents.contains_key(document)
    }

    /// Open a document at the given starting revision.
    pub fn open(
        &mut self,
        document: impl Into<DocumentId>,
        text: &str,
        revision: i32,
    ) -> Result<(), WorkspaceError> {
        let document = document.into();
        if self.documents.contains_key(&document) {
            return Err(WorkspaceError::AlreadyOpen(document));
        }
        self.documents.insert(
            document,
            DocumentEntry {
                index: LineIndex::from_text(text),
                revision,
                in_project: true,
            },
        );
        Ok(())
    }

    /// Close a document.
    pub fn close(&mut self, document: &DocumentId) -> Result<(), WorkspaceError> {
        self.documents
            .remove(document)
            .map(|_| ())
            .ok_or_else(|| WorkspaceError::NotOpen(document.clone()))
    }

    /// Full text of an open document.
    pub fn text(&self, document: &DocumentId) -> Option<String> {
        self.documents.get(document).map(|d| d.index.get_text())
    }

    /// Mark whether `document` belongs to the current project.
    pub fn set_in_project(
        &mut self,
        document: &DocumentId,
        in_project: bool,
    ) -> Result<(), WorkspaceError> {
        self.entry_mut(document)?.in_project = in_project;
        Ok(())
    }

    /// Insert text at a character offset. Returns the new revision.
    pub fn insert(
        &mut self,
        document: &DocumentId,
        char_offset: usize,
        text: &str,
    ) -> Result<i32, WorkspaceError> {
        let entry = self.entry_mut(document)?;
        entry.index.insert(char_offset, text);
        entry.revision = entry.revision.saturating_add(1);
        Ok(entry.revision)
    }

    /// Delete `len_chars` characters starting at `start_char`. Returns the new revision.
    pub fn delete(
        &mut self,
        document: &DocumentId,
        start_char: usize,
        len_chars: usize,
    ) -> Result<i32, WorkspaceError> {
        let entry = self.entry_mut(document)?;
        entry.index.delete(start_char, len_chars);
        entry.revision = entry.revision.saturating_add(1);
        Ok(entry.revision)
    }

    /// Replace the whole text of a document. Returns the new revision.
    pub fn set_text(&mut self, document: &DocumentId, text: &str) -> Result<i32, WorkspaceError> {
        let entry = self.entry_mut(document)?;
        entry.index = LineIndex::from_text(text);
        entry.revision = entry.revision.saturating_add(1);
        Ok(entry.revision)
    }

    fn entry_mut(&mut self, document: &DocumentId) -> Result<&mut DocumentEntry, WorkspaceError> {
        self.documents
            .get_mut(document)
            .ok_or_else(|| WorkspaceError::NotOpen(document.clone()))
    }
}

impl DocumentHost for Workspace {
    type Buffer = LineIndex;

    fn buffer(&self, document: &DocumentId) -> Option<&LineIndex> {
        self.documents.get(document).map(|d| &d.index)
    }

    fn revision(&self, document: &DocumentId) -> Option<i32> {
        self.documents.get(document).map(|d| d.revision)
    }

    fn belongs_to_project(&self, document: &DocumentId) -> bool {
        self.documents.get(document).is_some_and(|d| d.in_project)
    }
}
