//! Emission cursor.
//!
//! The cursor only books positions: it never buffers text. Each call hands
//! out the current offset and then moves past the emitted text, so the
//! sequence of offsets it returns is non-decreasing for the whole pass.

use text_size::TextSize;

use super::Token;

/// Monotonic position counter advanced by the length of each emitted piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: TextSize,
}

impl Cursor {
    pub fn new(start: TextSize) -> Self {
        Self { pos: start }
    }

    /// Current offset, without moving.
    pub fn offset(&self) -> TextSize {
        self.pos
    }

    /// Returns the current offset, then moves past `text`.
    pub fn advance(&mut self, text: &str) -> TextSize {
        self.advance_by(TextSize::of(text))
    }

    /// Books a fixed token spelling.
    pub fn advance_token(&mut self, token: Token) -> TextSize {
        self.advance(token.as_str())
    }

    /// Returns the current offset, then moves past a raw span of `len` bytes.
    ///
    /// Saturates at `u32::MAX`; use [`Cursor::checked_advance_by`] for spans
    /// whose length comes from input.
    pub fn advance_by(&mut self, len: TextSize) -> TextSize {
        let at = self.pos;
        self.pos = self.pos.checked_add(len).unwrap_or(TextSize::new(u32::MAX));
        at
    }

    /// Like [`Cursor::advance_by`], but returns `None` and stays put when the
    /// span would run past `u32::MAX`.
    pub fn checked_advance_by(&mut self, len: TextSize) -> Option<TextSize> {
        let at = self.pos;
        self.pos = self.pos.checked_add(len)?;
        Some(at)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(TextSize::new(0))
    }
}
