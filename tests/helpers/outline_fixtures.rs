//! A line-oriented stand-in for a C# outline provider.
//!
//! Understands the tidy, one-declaration-per-line C# used in these tests:
//! type blocks, fields, constants, events, properties, indexers, methods,
//! constructors, finalizers, operators and delegates. Enum members are not
//! reported.

use std::sync::OnceLock;

use regex::Regex;
use sharpen::base::{LineIndex, Span, TextSize};
use sharpen::core::Result;
use sharpen::ide::OutlineProvider;
use sharpen::{OutlineEntry, OutlineKind};

fn type_declaration() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[\w\s]*?\s)?(?P<keyword>class|struct|interface|enum|record(?:\s+struct)?)\s+(?P<name>\w+)")
            .unwrap()
    })
}

fn namespace_declaration() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^namespace\s+(?P<name>[\w.]+)").unwrap())
}

/// Outline provider backed by [`outline`].
pub struct FixtureOutline;

impl OutlineProvider for FixtureOutline {
    fn document_symbols(&self, _path: &str, text: &str) -> Result<Vec<OutlineEntry>> {
        Ok(outline(text))
    }
}

/// Outline entries for `text`, in document order.
pub fn outline(text: &str) -> Vec<OutlineEntry> {
    let mut namespace = None;
    Scanner { text, index: LineIndex::new(text) }.scan(0, text.len(), &mut namespace, None)
}

struct Scanner<'a> {
    text: &'a str,
    index: LineIndex,
}

impl Scanner<'_> {
    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(
            self.index.position(self.text, TextSize::from(start as u32)),
            self.index.position(self.text, TextSize::from(end as u32)),
        )
    }

    fn scan(&self, from: usize, to: usize, namespace: &mut Option<String>, container: Option<&str>) -> Vec<OutlineEntry> {
        let text = self.text;
        let mut entries = Vec::new();
        let mut attributes: Option<usize> = None;
        let mut pos = from;

        while pos < to {
            let line_end = text[pos..to].find('\n').map_or(to, |i| pos + i);
            let line = &text[pos..line_end];
            let trimmed = line.trim();
            let start = pos + (line.len() - line.trim_start().len());
            let mut next = line_end + 1;

            if trimmed.starts_with('[') {
                attributes.get_or_insert(start);
            } else if trimmed.is_empty()
                || trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with("using ")
                || trimmed == "{"
                || trimmed == "}"
            {
                attributes = None;
            } else if let Some(captures) = namespace_declaration().captures(trimmed) {
                *namespace = Some(captures["name"].to_string());
                attributes = None;
            } else if let Some(captures) = type_declaration().captures(trimmed)
                && !trimmed.contains('(')
            {
                let name = &captures["name"];
                let name_start = start + captures.name("name").map_or(0, |m| m.start());
                let open = start + text[start..].find('{').unwrap();
                let close = matching_brace(text, open);
                let keyword = &captures["keyword"];

                let kind = match keyword {
                    "interface" => OutlineKind::Interface,
                    "enum" => OutlineKind::Enum,
                    "struct" => OutlineKind::Struct,
                    k if k.ends_with("struct") => OutlineKind::Struct,
                    _ => OutlineKind::Class,
                };
                let detail = match namespace {
                    Some(ns) => format!("{ns}.{name}"),
                    None => name.to_string(),
                };
                let children = if kind == OutlineKind::Enum {
                    Vec::new()
                } else {
                    self.scan(open + 1, close, namespace, Some(name))
                };

                entries.push(
                    OutlineEntry::new(
                        kind,
                        name,
                        self.span(attributes.take().unwrap_or(start), close + 1),
                        self.span(name_start, name_start + name.len()),
                    )
                    .with_detail(detail)
                    .with_children(children),
                );
                next = text[close..].find('\n').map_or(to, |i| close + i + 1);
            } else {
                let (entry, end) = self.member(start, container.unwrap_or_default());
                let range_start = attributes.take().unwrap_or(start);
                entries.push(OutlineEntry { range: self.span(range_start, end), ..entry });
                next = text[end..].find('\n').map_or(to, |i| end + i + 1);
            }

            pos = next;
        }
        entries
    }

    /// Entry for the member declared at `start`, and where it ends.
    fn member(&self, start: usize, container: &str) -> (OutlineEntry, usize) {
        let text = self.text;
        let rest = &text[start..];
        let head_len = rest.find(['(', '{', '=', ';']).unwrap();
        let head = rest[..head_len].trim_end();
        let terminator = rest.as_bytes()[head_len];

        let end = match (rest.find('{'), rest.find(';')) {
            (Some(brace), Some(semi)) if brace < semi => matching_brace(text, start + brace) + 1,
            (Some(brace), None) => matching_brace(text, start + brace) + 1,
            (_, Some(semi)) => start + semi + 1,
            (None, None) => text.len(),
        };

        let last_word = |head: &str| -> (usize, String) {
            let at = head.rfind(char::is_whitespace).map_or(0, |i| i + 1);
            (at, head[at..].to_string())
        };

        // (kind, provider name, detail, selection offset in head, selection length)
        let (kind, name, detail, at, len) = if let Some(at) = head.find("this[") {
            (OutlineKind::Property, "this[]".to_string(), String::new(), at, "this".len())
        } else if let Some(at) = head.find("operator") {
            (OutlineKind::Operator, head[at..].to_string(), String::new(), at, "operator".len())
        } else if terminator == b'(' {
            let (at, word) = last_word(head);
            if let Some(type_name) = word.strip_prefix('~') {
                let detail = format!("{word}()");
                (OutlineKind::Method, "Finalize".to_string(), detail, at + 1, type_name.len())
            } else if word == container {
                let name = if head.split_whitespace().any(|w| w == "static") {
                    ".cctor"
                } else {
                    ".ctor"
                };
                (OutlineKind::Method, name.to_string(), format!("{word}()"), at, word.len())
            } else if head.split_whitespace().any(|w| w == "delegate") {
                (OutlineKind::Method, word.clone(), word.clone(), at, word.len())
            } else {
                let simple = word.rsplit('.').next().unwrap_or(&word).len();
                (OutlineKind::Method, word.clone(), String::new(), at + word.len() - simple, simple)
            }
        } else {
            let (at, word) = last_word(head);
            let words: Vec<&str> = head.split_whitespace().collect();
            let kind = if words.contains(&"event") {
                OutlineKind::Event
            } else if words.contains(&"const") {
                OutlineKind::Constant
            } else if terminator == b'{' || rest[head_len..].starts_with("=>") {
                OutlineKind::Property
            } else {
                OutlineKind::Field
            };
            let simple = word.rsplit('.').next().unwrap_or(&word).len();
            (kind, word.clone(), String::new(), at + word.len() - simple, simple)
        };

        let selection = self.span(start + at, start + at + len);
        let entry = OutlineEntry::new(kind, name, selection, selection).with_detail(detail);
        (entry, end)
    }
}

/// Offset of the `}` closing the `{` at `open`.
fn matching_brace(text: &str, open: usize) -> usize {
    let mut depth = 0usize;
    for (idx, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return open + idx;
                }
            }
            _ => {}
        }
    }
    text.len()
}
