//! Overlay configuration.
//!
//! Settings storage belongs to the host; the overlay only consumes the resulting values. They can
//! be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "executable": "/usr/bin/clangd",
//!   "clientId": "clangd-1",
//!   "sizeThresholdEnabled": true,
//!   "sizeThresholdKb": 1024,
//!   "decorationLayer": 1
//! }
//! ```

use crate::highlight::DecorationLayerId;
use crate::marker::MarkerCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CLIENT_NAME: &str = "Language Server";

#[derive(Debug, Error)]
/// Errors produced while loading an [`OverlayConfig`].
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    /// The configuration is not valid JSON (or has wrongly typed fields).
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    /// Reading the configuration file failed.
    Io(#[from] std::io::Error),

    #[error("size threshold is enabled but set to 0 KiB")]
    /// The size threshold would reject every document.
    InvalidSizeThreshold,
}

/// Values the overlay reads from the host's settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Language server executable; its file stem doubles as the default client name.
    pub executable: Option<PathBuf>,
    /// Display name of the client that owns the markers.
    pub client_name: Option<String>,
    /// Stable id of the client that owns the markers.
    pub client_id: String,
    /// Whether documents above [`size_threshold_kb`](Self::size_threshold_kb) are left unrendered.
    pub size_threshold_enabled: bool,
    /// Largest document (KiB) that is still rendered.
    pub size_threshold_kb: u64,
    /// Decoration layer highlights are written into.
    pub decoration_layer: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            executable: None,
            client_name: None,
            client_id: "language-client".to_string(),
            size_threshold_enabled: true,
            size_threshold_kb: 1024,
            decoration_layer: DecorationLayerId::CODE_WARNINGS.0,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check value constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_threshold_enabled && self.size_threshold_kb == 0 {
            return Err(ConfigError::InvalidSizeThreshold);
        }
        Ok(())
    }

    /// Client display name: the configured name, else the executable's file stem.
    pub fn client_name(&self) -> String {
        if let Some(name) = self.client_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.executable
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string())
    }

    /// Category attached to every marker this client creates.
    pub fn marker_category(&self) -> MarkerCategory {
        MarkerCategory::new(self.client_name(), self.client_id.clone())
    }

    /// Decoration layer as a typed id.
    pub fn decoration_layer(&self) -> DecorationLayerId {
        DecorationLayerId::new(self.decoration_layer)
    }

    /// Returns `true` if a document of `byte_len` bytes may be rendered.
    pub fn size_is_okay(&self, byte_len: usize) -> bool {
        !self.size_threshold_enabled
            || self.size_threshold_kb.saturating_mul(1024) >= byte_len as u64
    }
}
