//! Conversion between byte offsets and line/column positions.

use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// A line/column pair where the column is a byte offset into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Line start table for one document.
///
/// Lines are split on `\n`; a preceding `\r` stays part of the line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Total length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::from(0)
    }

    /// Line/byte-column of an offset. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    /// Range of a line's content, excluding the `\n` terminator.
    pub fn line_range(&self, line: usize) -> Option<TextRange> {
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => *next - TextSize::from(1),
            None => self.len,
        };
        Some(TextRange::new(start, end))
    }

    /// Byte offset of a character-column position.
    ///
    /// Lines past the end clamp to the end of text; columns past the end of a
    /// line clamp to the end of that line.
    pub fn offset(&self, text: &str, position: Position) -> TextSize {
        let Some(line) = self.line_range(position.line) else {
            return self.len;
        };
        let content = &text[line];
        let column = content
            .char_indices()
            .nth(position.column)
            .map(|(idx, _)| idx)
            .unwrap_or(content.len());
        line.start() + TextSize::from(column as u32)
    }

    /// Character-column position of a byte offset.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let LineCol { line, col } = self.line_col(offset);
        let start = self.line_starts[line as usize];
        let prefix = &text[TextRange::at(start, TextSize::from(col))];
        Position::new(line as usize, prefix.chars().count())
    }

    /// Byte range of a line/column span.
    pub fn range(&self, text: &str, span: Span) -> TextRange {
        let start = self.offset(text, span.start);
        let end = self.offset(text, span.end).max(start);
        TextRange::new(start, end)
    }
}
