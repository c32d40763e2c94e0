//! Rendering surface interface.
//!
//! The overlay pushes visual state to the editor through [`RenderSurface`]:
//! - highlight sets use replace semantics per `(document, layer)`
//! - markers are added, updated and removed one by one via [`MarkerId`] handles
//!
//! [`HeadlessSurface`] records everything it receives, for headless hosts and tests.

use crate::document::DocumentId;
use crate::highlight::{DecorationLayerId, Highlight};
use crate::marker::{Marker, MarkerId};
use std::collections::{BTreeMap, HashMap};

/// Editor-side sink for highlights and gutter markers.
pub trait RenderSurface {
    /// Replace the highlight set of `(document, layer)` with exactly `highlights`.
    fn set_highlights(
        &mut self,
        document: &DocumentId,
        layer: DecorationLayerId,
        highlights: Vec<Highlight>,
    );

    /// A marker became live.
    fn add_marker(&mut self, document: &DocumentId, id: MarkerId, marker: &Marker);

    /// A live marker changed appearance.
    fn update_marker(&mut self, document: &DocumentId, id: MarkerId, marker: &Marker);

    /// A marker was destroyed.
    fn remove_marker(&mut self, document: &DocumentId, id: MarkerId);
}

/// A surface that keeps the latest state it was given.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    highlights: HashMap<(DocumentId, DecorationLayerId), Vec<Highlight>>,
    markers: BTreeMap<MarkerId, (DocumentId, Marker)>,
    highlight_updates: usize,
}

impl HeadlessSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current highlights of `(document, layer)`.
    pub fn highlights(&self, document: &DocumentId, layer: DecorationLayerId) -> &[Highlight] {
        self.highlights
            .get(&(document.clone(), layer))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of `set_highlights` calls received so far.
    pub fn highlight_updates(&self) -> usize {
        self.highlight_updates
    }

    /// Look up a live marker.
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id).map(|(_, marker)| marker)
    }

    /// Live markers of `document`, in handle order.
    pub fn markers(&self, document: &DocumentId) -> Vec<&Marker> {
        self.markers
            .values()
            .filter(|(doc, _)| doc == document)
            .map(|(_, marker)| marker)
            .collect()
    }

    /// Total number of live markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_highlights(
        &mut self,
        document: &DocumentId,
        layer: DecorationLayerId,
        highlights: Vec<Highlight>,
    ) {
        self.highlight_updates += 1;
        self.highlights.insert((document.clone(), layer), highlights);
    }

    fn add_marker(&mut self, document: &DocumentId, id: MarkerId, marker: &Marker) {
        self.markers.insert(id, (document.clone(), marker.clone()));
    }

    fn update_marker(&mut self, document: &DocumentId, id: MarkerId, marker: &Marker) {
        if let Some(entry) = self.markers.get_mut(&id) {
            *entry = (document.clone(), marker.clone());
        }
    }

    fn remove_marker(&mut self, _document: &DocumentId, id: MarkerId) {
        self.markers.remove(&id);
    }
}
