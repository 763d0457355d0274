//! Text manipulation utilities for working with source code.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check if a string is a valid identifier (`_` or XID start, then XID continue).
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(is_word_character)
        }
        _ => false,
    }
}

/// Remove one trailing line break together with any spaces/tabs after it.
///
/// # Example
/// ```
/// use sharpen::core::text_utils::trim_end_line;
///
/// assert_eq!(trim_end_line("// note\n  "), "// note");
/// assert_eq!(trim_end_line("// note\n\n"), "// note\n");
/// assert_eq!(trim_end_line("// note"), "// note");
/// ```
pub fn trim_end_line(text: &str) -> &str {
    let trimmed = text.trim_end_matches([' ', '\t']);
    match trimmed.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => text,
    }
}

/// Remove spaces/tabs followed by one leading line break.
pub fn trim_start_line(text: &str) -> &str {
    let trimmed = text.trim_start_matches([' ', '\t']);
    let trimmed = trimmed.strip_prefix('\r').unwrap_or(trimmed);
    match trimmed.strip_prefix('\n') {
        Some(rest) => rest,
        None => text,
    }
}

/// Remove leading whitespace up to and including the last line break in it.
///
/// Indentation of the first non-empty line is kept.
pub fn trim_leading_empty_lines(text: &str) -> &str {
    let leading = text.len() - text.trim_start().len();
    match text[..leading].rfind(['\r', '\n']) {
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}

/// Remove trailing whitespace starting at the first line break in it.
pub fn trim_trailing_empty_lines(text: &str) -> &str {
    let content = text.trim_end().len();
    match text[content..].find(['\r', '\n']) {
        Some(idx) => &text[..content + idx],
        None => text,
    }
}

/// Replace every character except line breaks with spaces.
///
/// The result has the same byte length, so offsets into the original text
/// remain valid.
pub fn blank_out(text: &str) -> String {
    let mut blanked = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' | '\n' => blanked.push(c),
            _ => blanked.extend(std::iter::repeat_n(' ', c.len_utf8())),
        }
    }
    blanked
}

/// Blank out a byte range of `text` in place (see [`blank_out`]).
pub fn blank_out_range(text: &mut String, start: usize, end: usize) {
    let blanked = blank_out(&text[start..end]);
    text.replace_range(start..end, &blanked);
}

/// Whether the text is empty or only whitespace.
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
