//! Source location spans.

use std::fmt;

/// Byte range into the template source.
///
/// `end` is exclusive. Spans produced by the scanner always lie on UTF-8
/// character boundaries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Placeholder span for values that did not come from source text.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift a span that is relative to some inner slice so it becomes
    /// relative to the enclosing source.
    #[inline]
    #[must_use]
    pub const fn offset_by(self, base: usize) -> Span {
        Span {
            start: self.start + base,
            end: self.end + base,
        }
    }

    /// Compute the 1-based `(line, column)` of `start` within `source`.
    ///
    /// Columns count characters, not bytes. Offsets past the end of the
    /// source clamp to the last position.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let mut end = self.start.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let prefix = &source[..end];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
