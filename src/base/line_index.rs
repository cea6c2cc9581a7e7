//! Byte offset to line/column conversion

use text_size::{TextRange, TextSize};

use super::position::{Position, Span};

/// 0-indexed line and UTF-8 byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Start offsets of every line in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(idx, _)| TextSize::new(idx as u32 + 1)),
        );
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offsets past the end clamp to the end of the text
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let lc = self.line_col(offset);
        Position::new(lc.line as usize, lc.col as usize)
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("let x = 1\nin\n  x");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(10)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(15)), LineCol { line: 2, col: 2 });
    }

    #[test]
    fn test_newline_belongs_to_its_line() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.line_col(TextSize::new(1)), LineCol { line: 0, col: 1 });
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(TextSize::new(99)), LineCol { line: 0, col: 2 });
    }

    #[test]
    fn test_span_display() {
        let index = LineIndex::new("1 +\n  true");
        let span = index.span(TextRange::new(TextSize::new(6), TextSize::new(10)));
        assert_eq!(span.to_string(), "2:3");
    }
}
