//! Diagnostics reported by the host, and unused-using removal.

use serde::{Deserialize, Serialize};

use crate::base::{LineIndex, Position, Span};

use super::edits::TextEdit;

/// Diagnostic code for an unnecessary using directive.
pub const UNNECESSARY_USING: &str = "IDE0005";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// A diagnostic for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub range: Span,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(range: Span, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_unnecessary_using(&self) -> bool {
        self.code.as_deref() == Some(UNNECESSARY_USING)
    }
}

/// Deletions for every unnecessary using directive, bottom-up.
///
/// A deletion extends to the start of the next line when the rest of the
/// line after the directive is whitespace. Overlapping deletions are merged.
pub fn unused_using_edits(text: &str, diagnostics: &[Diagnostic]) -> Vec<TextEdit> {
    let index = LineIndex::new(text);
    let mut spans: Vec<Span> = diagnostics
        .iter()
        .filter(|d| d.is_unnecessary_using())
        .map(|diagnostic| {
            let next_line = Position::line_start(diagnostic.range.end.line + 1);
            let rest = index.range(text, Span::new(diagnostic.range.end, next_line));
            let rest_is_whitespace = !rest.is_empty() && text[rest].chars().all(char::is_whitespace);

            let end = if rest_is_whitespace {
                next_line
            } else {
                diagnostic.range.end
            };
            Span::new(diagnostic.range.start, end)
        })
        .collect();
    spans.sort_by_key(|span| span.start);

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start < last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    merged.into_iter().rev().map(TextEdit::delete).collect()
}
