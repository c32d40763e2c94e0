//! Presentation adapter: turns stored diagnostics into highlights and markers.
//!
//! Building is pure. [`build_presentation`] reads a store entry and a live buffer and returns
//! what should be on screen; [`crate::DiagnosticManager`] pushes the result to the surface and
//! takes ownership of the markers.

use crate::diagnostics::Diagnostic;
use crate::document::{DocumentId, TextBuffer};
use crate::highlight::{Highlight, TextStyle};
use crate::marker::{Marker, MarkerContext, MarkerFactory};
use crate::store::VersionedDiagnostics;
use crate::style::StyleResolver;

/// Highlights and markers for one document at one revision.
#[derive(Debug, Default)]
pub struct Presentation {
    /// Highlights, in diagnostic order (unresolvable ranges omitted).
    pub highlights: Vec<Highlight>,
    /// Markers, in diagnostic order.
    pub markers: Vec<Marker>,
    /// `false` if the entry did not apply to the revision (or was empty) and nothing was built.
    pub applied: bool,
}

/// Build the highlight for `diagnostic`, or `None` if its range does not resolve in `buffer`.
pub fn diagnostic_highlight<B>(
    diagnostic: &Diagnostic,
    buffer: &B,
    styles: &dyn StyleResolver,
) -> Option<Highlight>
where
    B: TextBuffer + ?Sized,
{
    let range = buffer.resolve_range(&diagnostic.range)?;
    let style = TextStyle::for_severity(diagnostic.severity);
    Some(Highlight {
        range,
        style,
        style_id: styles.text_style_id(style),
    })
}

/// Build the presentation of `entry` for `document` shown at `revision`.
///
/// Nothing is built when the entry is tagged with another revision or holds no diagnostics.
/// Otherwise every diagnostic yields a marker (if the factory produces one) and, when its range
/// resolves, a highlight.
pub fn build_presentation<B>(
    document: &DocumentId,
    entry: &VersionedDiagnostics,
    revision: i32,
    buffer: &B,
    is_project_file: bool,
    styles: &dyn StyleResolver,
    factory: &dyn MarkerFactory,
) -> Presentation
where
    B: TextBuffer + ?Sized,
{
    if !entry.matches_revision(revision) || entry.diagnostics.is_empty() {
        return Presentation::default();
    }

    let ctx = MarkerContext {
        document,
        is_project_file,
        styles,
    };

    let mut presentation = Presentation {
        highlights: Vec::with_capacity(entry.diagnostics.len()),
        markers: Vec::with_capacity(entry.diagnostics.len()),
        applied: true,
    };

    for diagnostic in &entry.diagnostics {
        match diagnostic_highlight(diagnostic, buffer, styles) {
            Some(highlight) => presentation.highlights.push(highlight),
            None => tracing::debug!(
                document = %document,
                line = diagnostic.range.start.line,
                "diagnostic range does not resolve; skipping highlight"
            ),
        }
        if let Some(marker) = factory.create_marker(&ctx, diagnostic) {
            presentation.markers.push(marker);
        }
    }

    presentation
}
