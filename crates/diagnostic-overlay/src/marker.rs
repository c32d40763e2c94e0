//! Gutter markers and the per-document sets that own them.
//!
//! Markers are line-anchored annotations (icon, color, tooltip, inline annotation, actions)
//! built one per diagnostic. A [`MarkerSet`] owns the markers of one document exclusively;
//! rendering surfaces only ever see them through [`MarkerId`] handles and borrowed references.

use crate::clipboard::Clipboard;
use crate::diagnostics::{Diagnostic, DiagnosticSeverity};
use crate::document::DocumentId;
use crate::style::{Color, MarkIcon, StyleResolver, ThemeColor};
use std::fmt;
use std::sync::Arc;

/// Icon name of the built-in "copy message" action.
pub const COPY_ACTION_ICON: &str = "edit-copy";
/// Tooltip of the built-in "copy message" action.
pub const COPY_ACTION_TOOLTIP: &str = "Copy to Clipboard";

/// Handle of a marker: the owning set plus the marker's insertion index.
///
/// Set ids are never reused, so a handle from a discarded set never aliases a live marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId {
    set: u64,
    index: u32,
}

impl MarkerId {
    /// Id of the owning marker set.
    pub fn set(self) -> u64 {
        self.set
    }

    /// Insertion index within the owning set.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Gutter priority; higher priority markers win when several share a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerPriority {
    /// Default priority.
    Normal,
    /// Used for errors.
    High,
}

/// Which client produced a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerCategory {
    /// Display name (e.g. `"rust-analyzer"`).
    pub name: String,
    /// Stable id.
    pub id: String,
}

impl MarkerCategory {
    /// Create a new category.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// An action attached to a marker (shown as a button in the marker tooltip).
pub trait MarkerAction: Send + Sync + fmt::Debug {
    /// Icon name.
    fn icon_name(&self) -> &str;
    /// Tooltip text.
    fn tooltip(&self) -> &str;
    /// Run the action.
    fn trigger(&self);
}

/// Copies a diagnostic message to the clipboard.
pub struct CopyToClipboard {
    text: String,
    clipboard: Arc<dyn Clipboard>,
}

impl CopyToClipboard {
    /// Create an action that copies `text` into `clipboard`.
    pub fn new(text: impl Into<String>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            text: text.into(),
            clipboard,
        }
    }

    /// The text this action copies.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for CopyToClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyToClipboard")
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl MarkerAction for CopyToClipboard {
    fn icon_name(&self) -> &str {
        COPY_ACTION_ICON
    }

    fn tooltip(&self) -> &str {
        COPY_ACTION_TOOLTIP
    }

    fn trigger(&self) {
        self.clipboard.set_text(&self.text);
    }
}

/// A gutter marker built from one diagnostic.
#[derive(Debug, Clone)]
pub struct Marker {
    /// Line number (1-based) of the diagnostic start.
    pub line: usize,
    /// Effective severity. Markers treat a missing severity as [`DiagnosticSeverity::Hint`].
    pub severity: DiagnosticSeverity,
    /// Tooltip text.
    pub tooltip: String,
    /// Inline annotation rendered at the end of the line.
    pub line_annotation: Option<String>,
    /// Producing client.
    pub category: MarkerCategory,
    /// Gutter priority.
    pub priority: MarkerPriority,
    /// Semantic color slot.
    pub color_slot: ThemeColor,
    /// Resolved color.
    pub color: Color,
    /// Semantic icon slot.
    pub icon: MarkIcon,
    /// Resolved icon name.
    pub icon_name: String,
    /// Attached actions.
    pub actions: Vec<Arc<dyn MarkerAction>>,
}

impl Marker {
    /// Build the visual part of a marker for `diagnostic` (no actions attached).
    ///
    /// Only errors are special-cased; every other severity, including a missing one, gets the
    /// warning treatment.
    pub fn for_diagnostic(
        diagnostic: &Diagnostic,
        category: MarkerCategory,
        styles: &dyn StyleResolver,
    ) -> Self {
        let severity = diagnostic.severity.unwrap_or(DiagnosticSeverity::Hint);
        let is_error = severity.is_error();
        let color_slot = if is_error {
            ThemeColor::ErrorMark
        } else {
            ThemeColor::WarningMark
        };
        let icon = if is_error {
            MarkIcon::Error
        } else {
            MarkIcon::Warning
        };

        Self {
            line: diagnostic.range.start.line as usize + 1,
            severity,
            tooltip: diagnostic.message.clone(),
            line_annotation: Some(diagnostic.message.clone()),
            category,
            priority: if is_error {
                MarkerPriority::High
            } else {
                MarkerPriority::Normal
            },
            color_slot,
            color: styles.color(color_slot),
            icon,
            icon_name: styles.icon_name(icon),
            actions: Vec::new(),
        }
    }

    /// Attach an action.
    pub fn with_action(mut self, action: Arc<dyn MarkerAction>) -> Self {
        self.actions.push(action);
        self
    }

    /// Switch to another color slot, resolving it through `styles`.
    pub fn set_color(&mut self, slot: ThemeColor, styles: &dyn StyleResolver) {
        self.color_slot = slot;
        self.color = styles.color(slot);
    }

    /// Re-resolve color and icon (e.g. after a theme change).
    pub fn restyle(&mut self, styles: &dyn StyleResolver) {
        self.color = styles.color(self.color_slot);
        self.icon_name = styles.icon_name(self.icon);
    }

    /// Trigger the action at `index`. Returns `false` if there is no such action.
    pub fn trigger_action(&self, index: usize) -> bool {
        match self.actions.get(index) {
            Some(action) => {
                action.trigger();
                true
            }
            None => false,
        }
    }
}

/// Inputs available to a [`MarkerFactory`].
pub struct MarkerContext<'a> {
    /// Document the marker belongs to.
    pub document: &'a DocumentId,
    /// Whether the document belongs to the analyzer's project.
    pub is_project_file: bool,
    /// Active style resolver.
    pub styles: &'a dyn StyleResolver,
}

/// Builds markers for diagnostics.
pub trait MarkerFactory: Send + Sync {
    /// Build the marker for `diagnostic`, or `None` to show no marker for it.
    fn create_marker(&self, ctx: &MarkerContext<'_>, diagnostic: &Diagnostic) -> Option<Marker>;
}

/// Default factory: one marker per diagnostic with a "copy message" action.
pub struct DiagnosticMarkerFactory {
    category: MarkerCategory,
    clipboard: Arc<dyn Clipboard>,
}

impl DiagnosticMarkerFactory {
    /// Create a factory tagging markers with `category` and copying into `clipboard`.
    pub fn new(category: MarkerCategory, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            category,
            clipboard,
        }
    }
}

impl MarkerFactory for DiagnosticMarkerFactory {
    fn create_marker(&self, ctx: &MarkerContext<'_>, diagnostic: &Diagnostic) -> Option<Marker> {
        let marker = Marker::for_diagnostic(diagnostic, self.category.clone(), ctx.styles);
        let copy = CopyToClipboard::new(diagnostic.message.clone(), Arc::clone(&self.clipboard));
        Some(marker.with_action(Arc::new(copy)))
    }
}

/// The markers of one document.
#[derive(Debug)]
pub struct MarkerSet {
    id: u64,
    enabled: bool,
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            enabled: true,
            markers: Vec::new(),
        }
    }

    /// `false` once the set has been disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns `true` if the set holds no marker.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Look up a marker by handle.
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        if id.set != self.id {
            return None;
        }
        self.markers.get(id.index())
    }

    /// Markers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &Marker)> + '_ {
        self.markers
            .iter()
            .enumerate()
            .map(|(index, marker)| (self.handle(index), marker))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (MarkerId, &mut Marker)> + '_ {
        let set = self.id;
        self.markers.iter_mut().enumerate().map(move |(index, marker)| {
            (
                MarkerId {
                    set,
                    index: index as u32,
                },
                marker,
            )
        })
    }

    pub(crate) fn push(&mut self, marker: Marker) -> MarkerId {
        let id = self.handle(self.markers.len());
        self.markers.push(marker);
        id
    }

    /// Gray out every marker. Returns `false` if the set was already disabled.
    pub(crate) fn disable(&mut self, styles: &dyn StyleResolver) -> bool {
        if !self.enabled {
            return false;
        }
        for marker in &mut self.markers {
            marker.set_color(ThemeColor::Disabled, styles);
        }
        self.enabled = false;
        true
    }

    fn handle(&self, index: usize) -> MarkerId {
        MarkerId {
            set: self.id,
            index: index as u32,
        }
    }
}
