//! Composition buffer for typed codes.
//!
//! The buffer holds the raw ASCII codes typed so far (e.g. "th") before they
//! are committed. It only grows at the end; backspace removes the last code
//! character and a commit or mode switch clears it. Because every character
//! is ASCII, byte offsets and character offsets coincide, which the
//! segmentation search relies on.

/// ASCII-only composition buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Create a new empty input buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Get the raw input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character. Non-ASCII characters are refused and `false` is
    /// returned.
    pub fn push(&mut self, ch: char) -> bool {
        if !ch.is_ascii() {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// Remove the last character (backspace).
    /// Returns true if a character was deleted.
    pub fn pop(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
