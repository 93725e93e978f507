//! Offset to line/column mapping over a document snapshot.
//!
//! The formatter reports byte offsets into the text it was given; editors
//! address text by line and column. A [`LineIndex`] is built once per check
//! cycle from the same snapshot the formatter saw, so the two coordinate
//! spaces always agree.

/// Zero-indexed line/column position. Columns count bytes from the start of
/// the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

/// Half-open `[start, end)` span in line/column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Byte offsets of every line start in a document snapshot.
#[derive(Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Position of a byte offset. Offsets past the end of the text land on
    /// the last line.
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        };
        Position {
            line: line as u32,
            col: (offset - self.line_starts[line]) as u32,
        }
    }

    /// Range covering `[start, end)` byte offsets.
    #[must_use]
    pub fn range(&self, start: usize, end: usize) -> Range {
        Range {
            start: self.position_at(start),
            end: self.position_at(end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, col: u32) -> Position {
        Position { line, col }
    }

    #[test]
    fn position_on_first_line() {
        let index = LineIndex::new("int main() {}\n");
        assert_eq!(index.position_at(0), pos(0, 0));
        assert_eq!(index.position_at(4), pos(0, 4));
    }

    #[test]
    fn position_after_newlines() {
        let index = LineIndex::new("a\nbb\nccc\n");
        assert_eq!(index.position_at(2), pos(1, 0));
        assert_eq!(index.position_at(3), pos(1, 1));
        assert_eq!(index.position_at(5), pos(2, 0));
        assert_eq!(index.position_at(8), pos(2, 3));
    }

    #[test]
    fn position_at_newline_byte_stays_on_its_line() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.position_at(1), pos(0, 1));
    }

    #[test]
    fn position_past_end_clamps_to_last_line() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.position_at(50), pos(1, 48));
    }

    #[test]
    fn empty_document_is_line_zero() {
        let index = LineIndex::new("");
        assert_eq!(index.position_at(0), pos(0, 0));
    }

    #[test]
    fn crlf_counts_cr_as_line_content() {
        let index = LineIndex::new("ab\r\ncd");
        assert_eq!(index.position_at(2), pos(0, 2));
        assert_eq!(index.position_at(4), pos(1, 0));
    }

    #[test]
    fn range_spans_lines() {
        let index = LineIndex::new("ab\ncd\n");
        let range = index.range(1, 4);
        assert_eq!(range.start, pos(0, 1));
        assert_eq!(range.end, pos(1, 1));
    }
}
