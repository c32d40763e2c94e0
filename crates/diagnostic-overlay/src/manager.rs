//! Diagnostic manager: store, presentation and queries for one analyzer client.
//!
//! [`DiagnosticManager`] owns the [`DiagnosticStore`] and every [`MarkerSet`], and drives a
//! [`RenderSurface`] against the live buffers of a [`DocumentHost`].
//!
//! # Staleness
//!
//! Diagnostics are tagged with the revision they were computed for. A report for an outdated
//! revision is still stored, but it fails the revision gate:
//! - [`show_diagnostics`](DiagnosticManager::show_diagnostics) clears old highlights and adds none
//! - every query answers "no diagnostics"
//!
//! # Example
//!
//! ```rust
//! use diagnostic_overlay::{
//!     Diagnostic, DiagnosticManager, DiagnosticPosition, DiagnosticRange, DiagnosticSeverity,
//!     DocumentId, HeadlessSurface, MemoryClipboard, OverlayConfig, Workspace,
//! };
//! use std::sync::Arc;
//!
//! let doc = DocumentId::from("/src/main.rs");
//! let mut workspace = Workspace::new();
//! workspace.open(doc.clone(), "fn main() {\n    let x = 1;\n}\n", 1).unwrap();
//!
//! let mut manager = DiagnosticManager::new(
//!     workspace,
//!     HeadlessSurface::new(),
//!     OverlayConfig::default(),
//!     Arc::new(MemoryClipboard::new()),
//! );
//!
//! let unused = Diagnostic::new(DiagnosticRange::from_coords((1, 8), (1, 9)), "unused variable `x`")
//!     .with_severity(DiagnosticSeverity::Warning);
//! manager.publish(&doc, vec![unused.clone()], Some(1));
//!
//! assert_eq!(manager.diagnostics_at(&doc, DiagnosticPosition::new(1, 8)), vec![unused]);
//! assert_eq!(manager.surface().markers(&doc).len(), 1);
//!
//! // Typing moves the buffer to revision 2: the report no longer applies.
//! manager.host_mut().insert(&doc, 0, "// ").unwrap();
//! assert!(!manager.has_diagnostics(&doc));
//! ```

use crate::clipboard::Clipboard;
use crate::config::OverlayConfig;
use crate::diagnostics::{Diagnostic, DiagnosticPosition, DiagnosticRange};
use crate::document::{DocumentHost, DocumentId, TextBuffer};
use crate::highlight::DecorationLayerId;
use crate::marker::{DiagnosticMarkerFactory, Marker, MarkerFactory, MarkerId, MarkerSet};
use crate::presentation::{Presentation, build_presentation};
use crate::store::{DiagnosticStore, VersionedDiagnostics};
use crate::style::{DefaultTheme, StyleResolver};
use crate::surface::RenderSurface;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Notifications emitted by a [`DiagnosticManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticEvent {
    /// New markers became visible for a document (e.g. refresh gutters or minimaps).
    MarkersCreated {
        /// The document.
        document: DocumentId,
        /// Number of markers in the new set.
        count: usize,
    },
}

/// Event callback function type
pub type DiagnosticEventCallback = Box<dyn FnMut(&DiagnosticEvent) + Send>;

/// Hook applied to every report before it is stored.
pub trait DiagnosticFilter: Send + Sync {
    /// Return the diagnostics to keep for `document`.
    fn filter(&self, document: &DocumentId, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic>;
}

impl<F> DiagnosticFilter for F
where
    F: Fn(&DocumentId, Vec<Diagnostic>) -> Vec<Diagnostic> + Send + Sync,
{
    fn filter(&self, document: &DocumentId, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        self(document, diagnostics)
    }
}

/// Revision-gated diagnostics overlay for one analyzer client.
///
/// Dropping the manager hides every document's diagnostics first, so no marker outlives it.
pub struct DiagnosticManager<H: DocumentHost, S: RenderSurface> {
    host: H,
    surface: S,
    config: OverlayConfig,
    store: DiagnosticStore,
    markers: BTreeMap<DocumentId, MarkerSet>,
    next_marker_set: u64,
    layer: DecorationLayerId,
    styles: Arc<dyn StyleResolver>,
    factory: Box<dyn MarkerFactory>,
    filter: Option<Box<dyn DiagnosticFilter>>,
    callbacks: Vec<DiagnosticEventCallback>,
}

impl<H: DocumentHost, S: RenderSurface> DiagnosticManager<H, S> {
    /// Create a manager with the default theme and marker factory.
    ///
    /// Markers are tagged with [`OverlayConfig::marker_category`] and their "copy message"
    /// action writes into `clipboard`.
    pub fn new(host: H, surface: S, config: OverlayConfig, clipboard: Arc<dyn Clipboard>) -> Self {
        let factory = DiagnosticMarkerFactory::new(config.marker_category(), clipboard);
        Self {
            host,
            surface,
            layer: config.decoration_layer(),
            config,
            store: DiagnosticStore::new(),
            markers: BTreeMap::new(),
            next_marker_set: 1,
            styles: Arc::new(DefaultTheme),
            factory: Box::new(factory),
            filter: None,
            callbacks: Vec::new(),
        }
    }

    /// Use `styles` instead of the default theme.
    pub fn with_styles(mut self, styles: Arc<dyn StyleResolver>) -> Self {
        self.styles = styles;
        self
    }

    /// Use `factory` to build markers.
    pub fn with_marker_factory(mut self, factory: Box<dyn MarkerFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Filter every report through `filter` before storing it.
    pub fn with_filter(mut self, filter: impl DiagnosticFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// The document host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the document host (e.g. to edit buffers).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The configuration the manager was created with.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The diagnostic store (raw entries, no revision gate).
    pub fn store(&self) -> &DiagnosticStore {
        &self.store
    }

    /// Decoration layer highlights are written into.
    pub fn decoration_layer(&self) -> DecorationLayerId {
        self.layer
    }

    /// Change the decoration layer.
    ///
    /// Meant to be called before any diagnostics are handled. Highlights already written to the
    /// old layer are cleared; call [`show_diagnostics`](Self::show_diagnostics) to redraw them.
    pub fn set_decoration_layer(&mut self, layer: DecorationLayerId) {
        if layer == self.layer {
            return;
        }
        if !self.store.is_empty() {
            tracing::warn!(
                old = self.layer.0,
                new = layer.0,
                "decoration layer changed after diagnostics were stored"
            );
            let old = self.layer;
            for document in self.store.documents() {
                if self.host.buffer(document).is_some() {
                    self.surface.set_highlights(document, old, Vec::new());
                }
            }
        }
        self.layer = layer;
    }

    /// Subscribe to manager events.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&DiagnosticEvent) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Store `diagnostics` as the only entry for `document`.
    ///
    /// Whatever is currently shown for `document` is hidden first. Nothing is rendered; call
    /// [`show_diagnostics`](Self::show_diagnostics) (or use [`publish`](Self::publish)).
    pub fn set_diagnostics(
        &mut self,
        document: &DocumentId,
        diagnostics: Vec<Diagnostic>,
        revision: Option<i32>,
    ) {
        self.hide_diagnostics(document);

        let diagnostics = match &self.filter {
            Some(filter) => filter.filter(document, diagnostics),
            None => diagnostics,
        };
        tracing::debug!(
            document = %document,
            revision = ?revision,
            count = diagnostics.len(),
            "storing diagnostics"
        );
        self.store.replace(
            document.clone(),
            VersionedDiagnostics::new(revision, diagnostics),
        );
    }

    /// Clear highlights of `document` and destroy its markers. The store entry is kept.
    pub fn hide_diagnostics(&mut self, document: &DocumentId) {
        if self.host.buffer(document).is_some() {
            self.surface.set_highlights(document, self.layer, Vec::new());
        }
        self.discard_marker_set(document);
    }

    /// Render the stored diagnostics of `document` as of `revision`.
    ///
    /// The highlight set is always replaced, so a stale entry clears old highlights without
    /// adding new ones. Markers are only rebuilt when the entry applies, and are removed when the
    /// document exceeds the size threshold. Does nothing if no editor shows `document`.
    pub fn show_diagnostics(&mut self, document: &DocumentId, revision: i32) {
        let Some(buffer) = self.host.buffer(document) else {
            return;
        };

        let oversized = !self.config.size_is_okay(buffer.byte_len());
        let presentation = match self.store.get(document) {
            Some(_) if oversized => {
                tracing::debug!(
                    document = %document,
                    bytes = buffer.byte_len(),
                    "document exceeds size threshold; not rendering diagnostics"
                );
                Presentation::default()
            }
            Some(entry) => {
                let presentation = build_presentation(
                    document,
                    entry,
                    revision,
                    buffer,
                    self.host.belongs_to_project(document),
                    self.styles.as_ref(),
                    self.factory.as_ref(),
                );
                if !presentation.applied && !entry.diagnostics.is_empty() {
                    tracing::debug!(
                        document = %document,
                        stored = ?entry.revision,
                        revision,
                        "diagnostics are stale; not rendering"
                    );
                }
                presentation
            }
            None => Presentation::default(),
        };

        let Presentation {
            highlights,
            markers,
            applied,
        } = presentation;

        let created = if applied {
            self.install_marker_set(document, markers)
        } else {
            if oversized {
                self.discard_marker_set(document);
            }
            0
        };
        self.surface.set_highlights(document, self.layer, highlights);

        if created > 0 {
            self.emit(DiagnosticEvent::MarkersCreated {
                document: document.clone(),
                count: created,
            });
        }
    }

    /// Store a report and render it against the live revision of `document` (if open).
    pub fn publish(
        &mut self,
        document: &DocumentId,
        diagnostics: Vec<Diagnostic>,
        revision: Option<i32>,
    ) {
        self.set_diagnostics(document, diagnostics, revision);
        if let Some(live) = self.host.revision(document) {
            self.show_diagnostics(document, live);
        }
    }

    /// Hide every document's diagnostics and empty the store.
    ///
    /// Afterwards no marker is alive.
    pub fn clear_diagnostics(&mut self) {
        let documents: Vec<DocumentId> = self.store.documents().cloned().collect();
        for document in &documents {
            self.hide_diagnostics(document);
        }
        self.store.clear();

        if !self.markers.is_empty() {
            tracing::error!(
                documents = self.markers.len(),
                "markers left after clearing diagnostics; discarding"
            );
            let leftovers: Vec<DocumentId> = self.markers.keys().cloned().collect();
            for document in &leftovers {
                self.discard_marker_set(document);
            }
        }
    }

    /// Gray out the markers of `document`. Repeated calls have no further effect.
    pub fn disable(&mut self, document: &DocumentId) {
        let Some(set) = self.markers.get_mut(document) else {
            return;
        };
        if set.disable(self.styles.as_ref()) {
            for (id, marker) in set.iter() {
                self.surface.update_marker(document, id, marker);
            }
        }
    }

    /// Replace the style resolver and restyle every live marker.
    pub fn set_styles(&mut self, styles: Arc<dyn StyleResolver>) {
        self.styles = styles;
        for (document, set) in self.markers.iter_mut() {
            for (id, marker) in set.iter_mut() {
                marker.restyle(self.styles.as_ref());
                self.surface.update_marker(document, id, marker);
            }
        }
    }

    /// Diagnostics overlapping a caret at `position`, in report order.
    ///
    /// Empty if the stored diagnostics do not apply to the document's live revision.
    pub fn diagnostics_at(
        &self,
        document: &DocumentId,
        position: DiagnosticPosition,
    ) -> Vec<Diagnostic> {
        self.diagnostics_in(document, DiagnosticRange::point(position))
    }

    /// Diagnostics overlapping `range`, in report order, under the same revision gate.
    pub fn diagnostics_in(&self, document: &DocumentId, range: DiagnosticRange) -> Vec<Diagnostic> {
        self.current(document)
            .map(|diagnostics| {
                diagnostics
                    .iter()
                    .filter(|d| d.range.overlaps(&range))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `true` if `document` is open and currently has a diagnostic equal to `diagnostic`.
    pub fn has_diagnostic(&self, document: &DocumentId, diagnostic: &Diagnostic) -> bool {
        if self.host.buffer(document).is_none() {
            return false;
        }
        self.current(document)
            .is_some_and(|diagnostics| diagnostics.contains(diagnostic))
    }

    /// Returns `true` if `document` currently has at least one diagnostic.
    pub fn has_diagnostics(&self, document: &DocumentId) -> bool {
        self.current(document)
            .is_some_and(|diagnostics| !diagnostics.is_empty())
    }

    /// Visit every live marker, document by document, in insertion order.
    pub fn for_each_marker<F>(&self, mut f: F)
    where
        F: FnMut(&DocumentId, MarkerId, &Marker),
    {
        for (document, set) in &self.markers {
            for (id, marker) in set.iter() {
                f(document, id, marker);
            }
        }
    }

    /// The marker set of `document`, if its diagnostics are shown.
    pub fn marker_set(&self, document: &DocumentId) -> Option<&MarkerSet> {
        self.markers.get(document)
    }

    /// Total number of live markers.
    pub fn marker_count(&self) -> usize {
        self.markers.values().map(MarkerSet::len).sum()
    }

    fn current(&self, document: &DocumentId) -> Option<&[Diagnostic]> {
        self.store.current(document, self.host.revision(document))
    }

    fn install_marker_set(&mut self, document: &DocumentId, markers: Vec<Marker>) -> usize {
        self.discard_marker_set(document);
        if markers.is_empty() {
            return 0;
        }

        let mut set = MarkerSet::new(self.next_marker_set);
        self.next_marker_set += 1;
        for marker in markers {
            let id = set.push(marker);
            if let Some(marker) = set.get(id) {
                self.surface.add_marker(document, id, marker);
            }
        }

        let count = set.len();
        self.markers.insert(document.clone(), set);
        count
    }

    fn discard_marker_set(&mut self, document: &DocumentId) {
        if let Some(set) = self.markers.remove(document) {
            for (id, _) in set.iter() {
                self.surface.remove_marker(document, id);
            }
        }
    }

    fn emit(&mut self, event: DiagnosticEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }
}

impl<H: DocumentHost, S: RenderSurface> Drop for DiagnosticManager<H, S> {
    fn drop(&mut self) {
        self.clear_diagnostics();
    }
}
