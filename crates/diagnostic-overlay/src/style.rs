//! Style resolution capability.
//!
//! The overlay decides *which* visual treatment a diagnostic gets (error vs. warning, enabled vs.
//! disabled). A [`StyleResolver`] supplied by the host decides what that treatment looks like.

use crate::highlight::{DIAGNOSTIC_ERROR_STYLE_ID, DIAGNOSTIC_WARNING_STYLE_ID, StyleId, TextStyle};

/// An RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// An opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }
}

/// Semantic color slots used by markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    /// Gutter color of error markers.
    ErrorMark,
    /// Gutter color of every non-error marker.
    WarningMark,
    /// Color of markers whose diagnostics were disabled.
    Disabled,
}

/// Semantic icon slots used by markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkIcon {
    /// Error icon.
    Error,
    /// Warning icon.
    Warning,
}

/// Maps semantic style slots onto concrete host visuals.
pub trait StyleResolver: Send + Sync {
    /// Host style id for a highlight text style.
    fn text_style_id(&self, style: TextStyle) -> StyleId;

    /// Concrete color for a marker color slot.
    fn color(&self, color: ThemeColor) -> Color;

    /// Host icon name for a marker icon slot.
    fn icon_name(&self, icon: MarkIcon) -> String;
}

/// Built-in theme used when the host does not provide one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl StyleResolver for DefaultTheme {
    fn text_style_id(&self, style: TextStyle) -> StyleId {
        match style {
            TextStyle::Error => DIAGNOSTIC_ERROR_STYLE_ID,
            TextStyle::Warning => DIAGNOSTIC_WARNING_STYLE_ID,
        }
    }

    fn color(&self, color: ThemeColor) -> Color {
        match color {
            ThemeColor::ErrorMark => Color::rgb(0xE0, 0x3C, 0x3C),
            ThemeColor::WarningMark => Color::rgb(0xD9, 0xA0, 0x2A),
            ThemeColor::Disabled => Color::rgb(0x80, 0x80, 0x80),
        }
    }

    fn icon_name(&self, icon: MarkIcon) -> String {
        match icon {
            MarkIcon::Error => "codemodel-error".to_string(),
            MarkIcon::Warning => "codemodel-warning".to_string(),
        }
    }
}
