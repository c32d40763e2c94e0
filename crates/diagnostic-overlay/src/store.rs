//! Diagnostic store: the single source of truth for reported diagnostics.
//!
//! One [`VersionedDiagnostics`] entry per document, replaced wholesale on every report. Reads
//! that care about staleness go through [`DiagnosticStore::current`], which applies the
//! revision gate.

use crate::diagnostics::Diagnostic;
use crate::document::DocumentId;
use std::collections::BTreeMap;

/// Diagnostics reported for one document, tagged with the revision they were computed for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionedDiagnostics {
    /// Revision the diagnostics belong to; `None` applies to every revision.
    pub revision: Option<i32>,
    /// Diagnostics in analyzer order.
    pub diagnostics: Vec<Diagnostic>,
}

impl VersionedDiagnostics {
    /// Create a new entry.
    pub fn new(revision: Option<i32>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            revision,
            diagnostics,
        }
    }

    /// Returns `true` if the entry may be shown against `revision`.
    pub fn matches_revision(&self, revision: i32) -> bool {
        self.revision.is_none_or(|stored| stored == revision)
    }

    /// Like [`matches_revision`](Self::matches_revision) for a document whose revision may be
    /// unknown. An unknown revision only matches untagged entries.
    pub fn matches_live_revision(&self, revision: Option<i32>) -> bool {
        match revision {
            Some(revision) => self.matches_revision(revision),
            None => self.revision.is_none(),
        }
    }
}

/// Per-document diagnostics, ordered by document id.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    entries: BTreeMap<DocumentId, VersionedDiagnostics>,
}

impl DiagnosticStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no document has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw entry for `document`, without any revision check.
    ///
    /// `None` means "never reported"; an entry with an empty list means "reported clean".
    pub fn get(&self, document: &DocumentId) -> Option<&VersionedDiagnostics> {
        self.entries.get(document)
    }

    /// Store `entry` as the only entry for `document`. Returns the replaced entry.
    pub fn replace(
        &mut self,
        document: DocumentId,
        entry: VersionedDiagnostics,
    ) -> Option<VersionedDiagnostics> {
        self.entries.insert(document, entry)
    }

    /// Diagnostics for `document` if they apply to its live `revision`.
    pub fn current(&self, document: &DocumentId, revision: Option<i32>) -> Option<&[Diagnostic]> {
        self.entries
            .get(document)
            .filter(|entry| entry.matches_live_revision(revision))
            .map(|entry| entry.diagnostics.as_slice())
    }

    /// Documents with an entry, in order.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> + '_ {
        self.entries.keys()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticRange;

    fn diag(message: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticRange::from_coords((0, 0), (0, 1)), message)
    }

    #[test]
    fn test_replace_does_not_merge() {
        let mut store = DiagnosticStore::new();
        let doc = DocumentId::from("/a.rs");
        store.replace(doc.clone(), VersionedDiagnostics::new(Some(1), vec![diag("a")]));
        let old = store.replace(doc.clone(), VersionedDiagnostics::new(Some(2), vec![diag("b")]));

        assert_eq!(old.map(|e| e.diagnostics), Some(vec![diag("a")]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&doc).map(|e| e.diagnostics.clone()), Some(vec![diag("b")]));
    }

    #[test]
    fn test_missing_entry_differs_from_empty_entry() {
        let mut store = DiagnosticStore::new();
        let doc = DocumentId::from("/a.rs");
        assert!(store.get(&doc).is_none());

        store.replace(doc.clone(), VersionedDiagnostics::new(None, Vec::new()));
        let entry = store.get(&doc).expect("entry");
        assert!(entry.diagnostics.is_empty());
    }

    #[test]
    fn test_revision_gate() {
        let tagged = VersionedDiagnostics::new(Some(3), vec![diag("x")]);
        assert!(tagged.matches_revision(3));
        assert!(!tagged.matches_revision(4));
        assert!(!tagged.matches_live_revision(None));

        let untagged = VersionedDiagnostics::new(None, vec![diag("x")]);
        assert!(untagged.matches_revision(0));
        assert!(untagged.matches_revision(i32::MAX));
        assert!(untagged.matches_live_revision(None));
    }

    #[test]
    fn test_current_applies_gate() {
        let mut store = DiagnosticStore::new();
        let doc = DocumentId::from("/a.rs");
        store.replace(doc.clone(), VersionedDiagnostics::new(Some(3), vec![diag("x")]));

        assert_eq!(store.current(&doc, Some(3)).map(<[_]>::len), Some(1));
        assert!(store.current(&doc, Some(4)).is_none());
        assert!(store.current(&DocumentId::from("/b.rs"), Some(3)).is_none());
    }
}
