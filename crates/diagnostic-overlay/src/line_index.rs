//! Rope-backed line index for live buffers.
//!
//! Provides O(log N) line access plus the conversions the overlay needs between character
//! offsets (Unicode scalar values) and analyzer positions (line + UTF-16 code units).

use crate::diagnostics::DiagnosticPosition;
use ropey::{Rope, RopeSlice};

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Number of chars in `line` before its line break (`\r\n` counts as one break).
fn line_content_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    let last = line.char(len - 1);
    if last == '\n' && len >= 2 && line.char(len - 2) == '\r' {
        return len - 2;
    }
    if is_line_break(last) { len - 1 } else { len }
}

/// Logical line index - implemented using the Rope data structure
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index (one empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total byte count (UTF-8)
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get text of the specified line (excluding the line break)
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_number);
        Some(line.slice(..line_content_len(line)).to_string())
    }

    /// Insert text (at specified character offset)
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset)
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = start_char.saturating_add(len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Resolve an analyzer position into a character offset.
    ///
    /// Returns `None` when the line does not exist or the column lies past the end of the line
    /// (the buffer is shorter than the analyzer assumed). A column equal to the line length
    /// addresses the end of the line and resolves.
    pub fn resolve_position(&self, position: DiagnosticPosition) -> Option<usize> {
        let line_number = position.line as usize;
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let line = self.rope.line(line_number);
        let content = line.slice(..line_content_len(line));
        let character = position.character as usize;
        if character > content.len_utf16_cu() {
            return None;
        }

        let line_start = self.rope.line_to_char(line_number);
        Some(line_start + content.utf16_cu_to_char(character))
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
