//! Source locations carried by operators the student actually typed.

use std::fmt;

/// Byte range `[start, end)` of an operator in the raw student input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering a single character at `offset`.
    pub fn at(offset: usize) -> Self {
        Self::new(offset, offset + 1)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_at_covers_one_byte() {
        let span = Span::at(4);
        assert_eq!(span, Span::new(4, 5));
        assert_eq!(span.len(), 1);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(2, 7).to_string(), "2..7");
    }
}
