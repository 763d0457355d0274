//! Text edits and an in-memory document.

use text_size::TextRange;

use crate::base::{LineIndex, Position, Span};
use crate::core::{Result, SharpenError};

use super::TextEditor;

/// Replace the text in `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(range: Span, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    pub fn delete(range: Span) -> Self {
        Self::new(range, "")
    }
}

/// Span covering all of `text`.
pub fn whole_document(text: &str) -> Span {
    let index = LineIndex::new(text);
    Span::new(Position::default(), index.position(text, index.len()))
}

/// Apply a set of non-overlapping edits as one change.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let index = LineIndex::new(text);
    let mut ranges: Vec<(TextRange, &str)> = edits
        .iter()
        .map(|edit| (index.range(text, edit.range), edit.new_text.as_str()))
        .collect();
    ranges.sort_by_key(|(range, _)| (range.start(), range.end()));

    for pair in ranges.windows(2) {
        if pair[0].0.end() > pair[1].0.start() {
            return Err(SharpenError::collaborator(format!(
                "overlapping edits at {:?} and {:?}",
                pair[0].0, pair[1].0
            )));
        }
    }

    let mut result = text.to_string();
    for (range, new_text) in ranges.into_iter().rev() {
        result.replace_range(std::ops::Range::<usize>::from(range), new_text);
    }
    Ok(result)
}

/// A document held in memory; every edit set applies atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    path: String,
    text: String,
}

impl MemoryDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextEditor for MemoryDocument {
    fn path(&self) -> &str {
        &self.path
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<bool> {
        self.text = apply_text_edits(&self.text, edits)?;
        Ok(true)
    }
}
