//! Gap text between symbols: comments and preprocessor directives found there
//! move onto the adjacent symbol's header or footer.
//!
//! Gaps live in an arena for one pass. Symbols reference them by index through
//! [`TriviaLinks`]; two neighbours share the gap between them.

use crate::core::text_utils::{is_blank, trim_end_line, trim_start_line};
use crate::symbols::symbol::{Symbol, TriviaId, TriviaLinks};
use crate::syntax::patterns;
use crate::syntax::SymbolType;

use super::Source;

#[derive(Debug, Default)]
struct TriviaArena {
    gaps: Vec<String>,
}

impl TriviaArena {
    fn push(&mut self, text: &str) -> TriviaId {
        self.gaps.push(text.to_string());
        self.gaps.len() - 1
    }
}

/// Byte bounds inside which a symbol list's gaps are taken.
#[derive(Debug, Clone, Copy)]
struct Extent {
    opened: usize,
    end: usize,
}

/// A matched piece of gap text.
#[derive(Debug, Clone)]
struct TextSpan {
    start: usize,
    end: usize,
    value: String,
}

/// Link gaps, move comments and directives, then drop the gaps.
pub(super) fn attach(source: &Source<'_>, symbols: &mut [Symbol]) {
    let mut arena = TriviaArena::default();
    let file = Extent {
        opened: 0,
        end: source.text.len(),
    };

    link(source, symbols, file, &mut arena);
    tracing::debug!("[BUILD] linked {} gap texts", arena.gaps.len());

    move_comments(symbols, &mut arena);
    move_preprocessor_directives(symbols, &mut arena);
    clear_links(symbols);
}

fn participates(symbol: &Symbol) -> bool {
    symbol.symbol_type != SymbolType::PrimaryConstructor && symbol.range.is_some()
}

// ============================================================================
// LINKING
// ============================================================================

fn link(source: &Source<'_>, symbols: &mut [Symbol], extent: Extent, arena: &mut TriviaArena) {
    let mut previous: Option<usize> = None;

    for current in 0..symbols.len() {
        let Some(range) = symbols[current].range.filter(|_| participates(&symbols[current])) else {
            continue;
        };

        let previous_end = previous
            .and_then(|p| symbols[p].range)
            .map_or(extent.opened, |r| usize::from(r.end()));
        create_gap(source, symbols, previous_end, usize::from(range.start()), Some(current), previous, arena);

        if symbols[current].has_children() {
            let child_extent = extent_of(source, &symbols[current]);
            link(source, &mut symbols[current].children, child_extent, arena);
        }

        previous = Some(current);
    }

    if let Some(last) = previous {
        let last_end = symbols[last].range.map_or(extent.end, |r| usize::from(r.end()));
        if last_end < extent.end {
            create_gap(source, symbols, last_end, extent.end, None, Some(last), arena);
        }
    }
}

fn create_gap(
    source: &Source<'_>,
    symbols: &mut [Symbol],
    start: usize,
    end: usize,
    current: Option<usize>,
    previous: Option<usize>,
    arena: &mut TriviaArena,
) {
    let Some(text) = source.text.get(start..end).filter(|t| !t.is_empty()) else {
        return;
    };

    let id = arena.push(text);
    if let Some(previous) = previous {
        symbols[previous].links.after = Some(id);
    }
    if let Some(current) = current {
        symbols[current].links.before = Some(id);
    }
}

/// Where a container's member list opens and closes.
fn extent_of(source: &Source<'_>, parent: &Symbol) -> Extent {
    let len = source.text.len();
    let Some(range) = parent.range else {
        return Extent { opened: len, end: len };
    };

    let end = if parent.is_file_scoped() {
        len
    } else if parent.footer.is_empty() {
        usize::from(range.end())
    } else {
        usize::from(range.end()).saturating_sub(1)
    };

    let from = parent.name_end.map_or(usize::from(range.start()), usize::from);
    let opened = source.text.as_bytes()[from.min(len)..end.max(from).min(len)]
        .iter()
        .position(|b| matches!(b, b'{' | b';'))
        .map_or(end, |idx| from + idx + 1);

    Extent { opened, end }
}

// ============================================================================
// COMMENTS
// ============================================================================

fn move_comments(symbols: &mut [Symbol], arena: &mut TriviaArena) {
    for symbol in symbols.iter_mut().filter(|s| participates(s)) {
        if let Some(before) = symbol.links.before
            && move_comments_from_gap(symbol, before, true, arena)
        {
            symbol.links.before = None;
        }
    }

    if let Some(last) = symbols.iter_mut().rev().find(|s| participates(s))
        && let Some(after) = last.links.after
        && move_comments_from_gap(last, after, false, arena)
    {
        last.links.after = None;
    }

    for symbol in symbols.iter_mut() {
        move_comments(&mut symbol.children, arena);
    }
}

/// Returns whether the gap is fully consumed.
fn move_comments_from_gap(symbol: &mut Symbol, gap: TriviaId, is_before: bool, arena: &mut TriviaArena) -> bool {
    let mut spans = extract(
        &arena.gaps[gap],
        &[
            patterns::multi_line_comment(),
            patterns::xml_comment(),
            patterns::single_line_comment(),
        ],
    );
    if spans.is_empty() {
        return is_blank(&arena.gaps[gap]);
    }

    remove_spans(&mut arena.gaps[gap], &spans);
    let text = joined(&mut spans, trim_end_line);
    if is_before {
        symbol.insert_on_header(&text);
    } else {
        symbol.append_to_footer(&text);
    }

    is_blank(&arena.gaps[gap])
}

// ============================================================================
// PREPROCESSOR DIRECTIVES
// ============================================================================

fn move_preprocessor_directives(symbols: &mut [Symbol], arena: &mut TriviaArena) {
    for symbol in symbols.iter_mut() {
        move_preprocessor_directives(&mut symbol.children, arena);

        if !participates(symbol) {
            continue;
        }
        let TriviaLinks {
            before: Some(before),
            after: Some(after),
        } = symbol.links
        else {
            continue;
        };

        let leading = extract(&arena.gaps[before], &[patterns::open_directive()]);
        if leading.is_empty() {
            continue;
        }
        let trailing = extract(&arena.gaps[after], &[patterns::close_directive()]);
        if trailing.is_empty() {
            continue;
        }

        let (mut leading_to_move, mut trailing_to_move) = matching_directives(&leading, &trailing);

        if !leading_to_move.is_empty() {
            remove_spans(&mut arena.gaps[before], &leading_to_move);
            symbol.insert_on_header(&joined(&mut leading_to_move, trim_end_line));
            if is_blank(&arena.gaps[before]) {
                symbol.links.before = None;
            }
        }

        if !trailing_to_move.is_empty() {
            remove_spans(&mut arena.gaps[after], &trailing_to_move);
            symbol.append_to_footer(&joined(&mut trailing_to_move, trim_start_line));
            if is_blank(&arena.gaps[after]) {
                symbol.links.after = None;
            }
        }
    }
}

/// `#if`/`#endif` pairs and `#pragma` pairs naming the same warnings.
fn matching_directives(leading: &[TextSpan], trailing: &[TextSpan]) -> (Vec<TextSpan>, Vec<TextSpan>) {
    let mut leading_to_move = Vec::new();
    let mut trailing_to_move = Vec::new();

    let open_if = leading.iter().find(|s| s.value.contains("#if"));
    let close_if = trailing.iter().find(|s| s.value.contains("#endif"));
    if let (Some(open), Some(close)) = (open_if, close_if) {
        leading_to_move.push(open.clone());
        trailing_to_move.push(close.clone());
    }

    let open_pragma = leading.iter().find(|s| s.value.contains("#pragma"));
    let close_pragma = trailing.iter().find(|s| s.value.contains("#pragma"));
    if let (Some(open), Some(close)) = (open_pragma, close_pragma)
        && let (Some(opened), Some(closed)) = (pragma_subject(&open.value), pragma_subject(&close.value))
        && opened == closed
    {
        leading_to_move.push(open.clone());
        trailing_to_move.push(close.clone());
    }

    (leading_to_move, trailing_to_move)
}

/// Words after `#pragma warning disable|restore`.
fn pragma_subject(directive: &str) -> Option<String> {
    let words: Vec<_> = directive.split_whitespace().collect();
    (words.len() >= 4).then(|| words[3..].join(" "))
}

// ============================================================================
// SPANS
// ============================================================================

/// Non-overlapping `text` captures of each pattern in turn, in document order.
fn extract(text: &str, regexes: &[&regex::Regex]) -> Vec<TextSpan> {
    let mut spans: Vec<TextSpan> = Vec::new();

    for regex in regexes {
        for captures in regex.captures_iter(text) {
            let Some(found) = captures.name("text").filter(|m| !m.as_str().is_empty()) else {
                continue;
            };
            if spans.iter().any(|s| found.start() >= s.start && found.start() <= s.end) {
                continue;
            }
            spans.push(TextSpan {
                start: found.start(),
                end: found.end(),
                value: found.as_str().to_string(),
            });
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}

fn remove_spans(text: &mut String, spans: &[TextSpan]) {
    let mut sorted: Vec<_> = spans.iter().collect();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.start));
    for span in sorted {
        if span.end <= text.len() {
            text.replace_range(span.start..span.end, "");
        }
    }
}

/// Join span values with line breaks after trimming the last one.
fn joined(spans: &mut [TextSpan], trim_last: fn(&str) -> &str) -> String {
    spans.sort_by_key(|s| s.start);
    if let Some(last) = spans.last_mut() {
        last.value = trim_last(&last.value).to_string();
    }
    spans
        .iter()
        .map(|s| s.value.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn clear_links(symbols: &mut [Symbol]) {
    for symbol in symbols {
        symbol.links = TriviaLinks::default();
        clear_links(&mut symbol.children);
    }
}
