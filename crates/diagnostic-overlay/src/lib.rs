#![warn(missing_docs)]
//! Diagnostic Overlay - revision-gated language server diagnostics for headless editors
//!
//! # Overview
//!
//! `diagnostic-overlay` takes diagnostic reports from an external analyzer (a language server),
//! reconciles them against live, concurrently edited buffers and renders them as range
//! highlights and gutter markers. Every report carries the document revision it was computed
//! for, and nothing is ever shown against, or matched to, another revision.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DiagnosticManager (set/show/hide/queries)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Presentation Adapter                       │  ← Highlights + markers
//! ├──────────────────────┬──────────────────────┤
//! │  Diagnostic Store    │  Marker Sets         │  ← Owned state
//! ├──────────────────────┴──────────────────────┤
//! │  Range Model (LineIndex, overlap rule)      │  ← Coordinates
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Collaborators are injected rather than global:
//! - [`DocumentHost`] / [`TextBuffer`] - open buffers and their revisions
//! - [`RenderSurface`] - highlight sets and gutter markers
//! - [`StyleResolver`] - severity buckets to colors, icons and text styles
//! - [`Clipboard`] - target of the "copy message" marker action
//!
//! [`Workspace`], [`HeadlessSurface`] and [`MemoryClipboard`] are in-memory implementations
//! for headless hosts and tests.
//!
//! # Quick Start
//!
//! ```rust
//! use diagnostic_overlay::{
//!     DecorationLayerId, Diagnostic, DiagnosticManager, DiagnosticRange, DiagnosticSeverity,
//!     DocumentId, HeadlessSurface, MemoryClipboard, OverlayConfig, TextStyle, Workspace,
//! };
//! use std::sync::Arc;
//!
//! let doc = DocumentId::from("/src/lib.rs");
//! let mut workspace = Workspace::new();
//! workspace.open(doc.clone(), "pub fn f() -> u32 {\n    \"x\"\n}\n", 4).unwrap();
//!
//! let mut manager = DiagnosticManager::new(
//!     workspace,
//!     HeadlessSurface::new(),
//!     OverlayConfig::default(),
//!     Arc::new(MemoryClipboard::new()),
//! );
//!
//! let mismatch = Diagnostic::new(DiagnosticRange::from_coords((1, 4), (1, 7)), "mismatched types")
//!     .with_severity(DiagnosticSeverity::Error);
//! manager.set_diagnostics(&doc, vec![mismatch], Some(4));
//! manager.show_diagnostics(&doc, 4);
//!
//! let highlights = manager.surface().highlights(&doc, DecorationLayerId::CODE_WARNINGS);
//! assert_eq!(highlights.len(), 1);
//! assert_eq!(highlights[0].style, TextStyle::Error);
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - diagnostic data model and overlap rule
//! - [`line_index`] - rope-backed buffer index with UTF-16 position resolution
//! - [`document`] - document identity and host interfaces
//! - [`workspace`] - in-memory document host
//! - [`store`] - per-document versioned diagnostics
//! - [`marker`] - gutter markers, marker sets, marker actions
//! - [`presentation`] - highlight/marker building
//! - [`surface`] - rendering surface interface
//! - [`manager`] - the public entry point

pub mod clipboard;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod highlight;
pub mod line_index;
pub mod manager;
pub mod marker;
pub mod presentation;
pub mod store;
pub mod style;
pub mod surface;
pub mod workspace;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::{ConfigError, OverlayConfig};
pub use diagnostics::{Diagnostic, DiagnosticPosition, DiagnosticRange, DiagnosticSeverity};
pub use document::{DocumentHost, DocumentId, TextBuffer};
pub use highlight::{
    DIAGNOSTIC_ERROR_STYLE_ID, DIAGNOSTIC_WARNING_STYLE_ID, DecorationLayerId, Highlight,
    StyleId, TextStyle,
};
pub use line_index::LineIndex;
pub use manager::{DiagnosticEvent, DiagnosticEventCallback, DiagnosticFilter, DiagnosticManager};
pub use marker::{
    COPY_ACTION_ICON, COPY_ACTION_TOOLTIP, CopyToClipboard, DiagnosticMarkerFactory, Marker,
    MarkerAction, MarkerCategory, MarkerContext, MarkerFactory, MarkerId, MarkerPriority,
    MarkerSet,
};
pub use presentation::{Presentation, build_presentation, diagnostic_highlight};
pub use store::{DiagnosticStore, VersionedDiagnostics};
pub use style::{Color, DefaultTheme, MarkIcon, StyleResolver, ThemeColor};
pub use surface::{HeadlessSurface, RenderSurface};
pub use workspace::{Workspace, WorkspaceError};
