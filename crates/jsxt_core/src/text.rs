//! Source locations and line bookkeeping.
//!
//! Offsets count Unicode scalar values of the decoded source, and lines
//! are zero-based internally. Diagnostics convert to one-based lines at
//! the boundary.

use std::fmt;
use std::ops::Range;

/// An offset into the decoded source text.
pub type TextPos = usize;

/// Where a token sits in the source: `[begin, end)` plus the zero-based
/// line on which it begins.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Location {
    pub begin: TextPos,
    pub end: TextPos,
    pub line: u32,
}

impl Location {
    #[inline]
    pub fn new(begin: TextPos, end: TextPos, line: u32) -> Self {
        debug_assert!(end >= begin);
        Self { begin, end, line }
    }

    /// An empty location at a position.
    #[inline]
    pub fn empty(pos: TextPos, line: u32) -> Self {
        Self {
            begin: pos,
            end: pos,
            line,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The line as shown to users.
    #[inline]
    pub fn line_number(&self) -> u32 {
        self.line + 1
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})@{}", self.begin, self.end, self.line)
    }
}

/// Count the line feeds in `text`.
#[inline]
pub fn count_line_feeds(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// The line feeds of `text` and nothing else.
///
/// Used wherever source is dropped or rewritten but later lines must keep
/// their numbers.
pub fn line_feeds_of(text: &str) -> String {
    "\n".repeat(count_line_feeds(text))
}

/// Decode a UTF-16 code-unit buffer. Unpaired surrogates become U+FFFD.
pub fn decode_utf16(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encode text back into UTF-16 code units.
pub fn encode_utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Byte offset of the `pos`-th scalar value in `text`, clamped to its length.
pub fn char_to_byte_offset(text: &str, pos: TextPos) -> usize {
    text.char_indices()
        .nth(pos)
        .map_or(text.len(), |(offset, _)| offset)
}
