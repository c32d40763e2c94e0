//! Clipboard capability used by marker actions.

use std::sync::Mutex;

/// Something that can receive copied text.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard (and primary selection, where the platform has one) with `text`.
    fn set_text(&self, text: &str);
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last copied text, if any.
    pub fn text(&self) -> Option<String> {
        match self.contents.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) {
        let mut guard = match self.contents.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(text.to_string());
    }
}
