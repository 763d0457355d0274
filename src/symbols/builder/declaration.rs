//! Per-symbol declaration parsing: range adjustment, attributes, modifiers,
//! names, declared types and implemented contracts.

use text_size::{TextRange, TextSize};

use crate::core::text_utils::{is_blank, trim_leading_empty_lines};
use crate::core::{Result, SharpenError};
use crate::symbols::classify;
use crate::symbols::symbol::{ParentRef, Symbol};
use crate::syntax::patterns;
use crate::syntax::{AccessModifier, MemberModifiers, SymbolType};

use super::Source;

const STOP_CHARS: &[u8] = b"\n\r};{";

// ============================================================================
// RANGES
// ============================================================================

/// Move a provider range start back to the previous line break or block
/// delimiter so leading attributes and modifiers are included. Event ranges
/// also extend forward to their terminating `;` or accessor block.
pub(super) fn adjust_range(text: &str, range: TextRange, symbol_type: SymbolType) -> TextRange {
    let start = adjust_start(text, usize::from(range.start()));
    let end = if symbol_type == SymbolType::Event {
        extend_event_end(text, usize::from(range.end()))
    } else {
        usize::from(range.end())
    };
    TextRange::new(to_size(start), to_size(end.max(start)))
}

pub(super) fn adjust_start(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut idx = start.min(bytes.len());
    loop {
        if bytes.get(idx).is_some_and(|b| STOP_CHARS.contains(b)) {
            return idx + 1;
        }
        if idx == 0 {
            return 0;
        }
        idx -= 1;
    }
}

fn extend_event_end(text: &str, end: usize) -> usize {
    let bytes = text.as_bytes();
    if end > 0 && matches!(bytes.get(end - 1), Some(b';' | b'}')) {
        return end;
    }
    for idx in end..bytes.len() {
        match bytes[idx] {
            b';' => return idx + 1,
            b'{' => return matching_close(bytes, idx, b'{', b'}').map_or(bytes.len(), |i| i + 1),
            _ => {}
        }
    }
    bytes.len()
}

/// Index of the delimiter closing the one at `open`.
pub(super) fn matching_close(bytes: &[u8], open: usize, opener: u8, closer: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, &byte) in bytes.iter().enumerate().skip(open) {
        if byte == opener {
            depth += 1;
        } else if byte == closer {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

pub(super) fn to_size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

/// Byte range of a primary constructor's parameter list: the first
/// parenthesized group after the type name and before its body.
pub(super) fn parameter_list(text: &str, name_end: TextSize) -> Option<TextRange> {
    let bytes = text.as_bytes();
    let from = usize::from(name_end);
    let open = (from..bytes.len())
        .take_while(|&i| !matches!(bytes[i], b'{' | b';' | b':'))
        .find(|&i| bytes[i] == b'(')?;
    let close = matching_close(bytes, open, b'(', b')')?;
    Some(TextRange::new(to_size(open), to_size(close + 1)))
}

// ============================================================================
// NAMES
// ============================================================================

/// Resolve the simple name and enclosing namespace from the provider detail.
pub(super) fn parse_name_and_namespace(symbol: &mut Symbol, parent: Option<&ParentRef>) {
    match symbol.symbol_type {
        SymbolType::Constructor | SymbolType::StaticConstructor | SymbolType::Finalizer => {
            let pattern = if symbol.symbol_type == SymbolType::Finalizer {
                patterns::finalizer_name()
            } else {
                patterns::constructor_name()
            };
            let name = pattern.captures(&symbol.detail).map(|c| c["name"].to_string());
            match (name, parent) {
                (Some(name), _) => symbol.name = name.into(),
                (None, Some(parent)) => symbol.name = type_name_without_generics(&parent.name).into(),
                (None, None) => {}
            }
        }
        SymbolType::Namespace
        | SymbolType::Delegate
        | SymbolType::Interface
        | SymbolType::Class
        | SymbolType::Struct
        | SymbolType::Enum
        | SymbolType::RecordClass
        | SymbolType::RecordStruct => {
            if let Some(captures) = patterns::qualified_type_name().captures(&symbol.detail) {
                symbol.name = captures["name"].into();
                if let Some(namespace) = captures.name("namespace") {
                    symbol.namespace = Some(namespace.as_str().into());
                }
            }
        }
        _ => {}
    }
}

fn type_name_without_generics(name: &str) -> &str {
    name.split('<').next().unwrap_or(name)
}

/// Name as it appears in declaration text.
fn searchable_name(symbol: &Symbol) -> &str {
    if symbol.symbol_type == SymbolType::Indexer {
        return "this";
    }
    symbol.name.rsplit('.').next().unwrap_or(&symbol.name)
}

// ============================================================================
// DECLARATION TEXT
// ============================================================================

/// Strip attributes and modifiers from the start of `text`, recording them on
/// the symbol, and build the container header. Returns the offset just past
/// the modifiers, or 0 when there are none.
fn parse_attributes_and_modifiers(symbol: &mut Symbol, text: &str) -> Result<usize> {
    let Some(captures) = patterns::attributes_and_modifiers().captures(text) else {
        return Ok(0);
    };

    let mut signature_index = 0;
    let mut after_modifiers = 0;

    if let Some(attributes) = captures.name("attributes").filter(|m| !m.as_str().is_empty()) {
        let written = attributes.as_str().trim_end();
        symbol.append_to_header(trim_leading_empty_lines(written));
        symbol.body = trim_leading_empty_lines(&text[written.len()..]).to_string();

        signature_index = attributes.end();
        after_modifiers = attributes.end();
    }

    if let Some(modifiers) = captures.name("modifiers").filter(|m| !m.as_str().is_empty()) {
        let access = AccessModifier::from_modifiers(modifiers.as_str());
        if access != AccessModifier::None {
            symbol.access = access;
        }
        symbol.modifiers = MemberModifiers::from_modifiers(modifiers.as_str());
        after_modifiers = modifiers.end();
    }

    if symbol.can_have_children() {
        parse_container_signature(symbol, text, signature_index)?;
    }

    Ok(after_modifiers)
}

enum BlockOpen {
    Brace(usize),
    Terminator(usize),
}

fn find_block_open(text: &str, from: usize) -> Option<BlockOpen> {
    let mut depth = 0i32;
    for (idx, byte) in text.bytes().enumerate().skip(from) {
        match byte {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            b'{' => return Some(BlockOpen::Brace(idx)),
            b';' if depth <= 0 => return Some(BlockOpen::Terminator(idx)),
            _ => {}
        }
    }
    None
}

fn parse_container_signature(symbol: &mut Symbol, text: &str, signature_index: usize) -> Result<()> {
    let indent = line_indent(text, signature_index);

    match find_block_open(text, signature_index) {
        Some(BlockOpen::Brace(open)) => {
            let signature = text[signature_index..open].trim();
            symbol.append_to_header(&format!("{indent}{signature}\n{indent}{{"));
            symbol.append_to_footer(&format!("{indent}}}"));
            parse_implementations(symbol, signature);
        }
        Some(BlockOpen::Terminator(end)) => {
            let signature = text[signature_index..end].trim();
            symbol.append_to_header(&format!("{indent}{signature};"));
            symbol.file_scoped = symbol.symbol_type == SymbolType::Namespace;
            parse_implementations(symbol, signature);
        }
        None => return Err(SharpenError::missing_open_brace(symbol.qualified_name())),
    }
    Ok(())
}

/// Indentation of the line on which the first non-blank character at or
/// after `from` sits.
fn line_indent(text: &str, from: usize) -> &str {
    let rest = &text[from..];
    let start = from + (rest.len() - rest.trim_start().len());
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..start];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

/// Record the contracts listed after the first top-level `:` of a signature.
pub(super) fn parse_implementations(symbol: &mut Symbol, signature: &str) {
    let signature = match patterns::where_clause().find(signature) {
        Some(found) => &signature[..found.start()],
        None => signature,
    };
    let Some(colon) = top_level_position(signature, |b| b == b':') else {
        return;
    };

    let list = signature[colon + 1..].replace(['\r', '\n'], " ");
    let mut rest = list.as_str();
    loop {
        let end = top_level_position(rest, |b| b == b',').unwrap_or(rest.len());
        let contract = contract_name(&rest[..end]);
        if patterns::implemented_type().is_match(contract) {
            symbol.implements.push(contract.to_string());
        }
        if end >= rest.len() {
            break;
        }
        rest = &rest[end + 1..];
    }
}

/// A contract entry without base-constructor arguments.
fn contract_name(entry: &str) -> &str {
    let mut depth = 0i32;
    for (idx, byte) in entry.bytes().enumerate() {
        match byte {
            b'<' => depth += 1,
            b'>' => depth -= 1,
            b'(' if depth == 0 => return entry[..idx].trim(),
            _ => {}
        }
    }
    entry.trim()
}

fn top_level_position(text: &str, wanted: impl Fn(u8) -> bool) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth -= 1,
            _ if depth == 0 && wanted(byte) => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Parse everything in front of the symbol's name: attributes, modifiers,
/// container header, declaration keywords and return type.
pub(super) fn parse_code_before_symbol_name(
    source: &Source<'_>,
    symbol: &mut Symbol,
    code: &str,
) -> Result<()> {
    let after_modifiers = parse_attributes_and_modifiers(symbol, code)?;

    let name_pattern = patterns::symbol_name(searchable_name(symbol));
    let Some(found) = name_pattern.find_at(code, after_modifiers) else {
        tracing::trace!("[BUILD] name '{}' not found in declaration text", symbol.name);
        return Ok(());
    };

    if after_modifiers == 0 && found.start() == 0 {
        return rederive_from_line(source, symbol);
    }

    apply_declared_type(symbol, &code[after_modifiers..found.start()])
}

fn apply_declared_type(symbol: &mut Symbol, code_before_name: &str) -> Result<()> {
    let declared = classify::refine_from_declaration(code_before_name)?;
    if let Some(symbol_type) = declared.symbol_type {
        symbol.symbol_type = symbol_type;
    }
    if declared.return_type.is_some() {
        symbol.return_type = declared.return_type;
    }
    Ok(())
}

/// The symbol text starts at its name. When other code precedes it on the
/// same line, widen to the whole line and parse again.
fn rederive_from_line(source: &Source<'_>, symbol: &mut Symbol) -> Result<()> {
    let Some(range) = symbol.range else {
        return Ok(());
    };
    let start = source.index.line_col(range.start());
    let Some(line) = source.index.line_range(start.line as usize) else {
        return Ok(());
    };
    if is_blank(source.slice(TextRange::new(line.start(), range.start()))) {
        return Ok(());
    }
    if source.index.line_col(range.end()).line != start.line {
        return Err(SharpenError::multi_line(symbol.qualified_name()));
    }

    let line_text = source.slice(line);
    let name_pattern = patterns::symbol_name(searchable_name(symbol));
    let modifiers_end = patterns::attributes_and_modifiers()
        .captures(line_text)
        .and_then(|c| c.name("modifiers"))
        .map_or(0, |m| m.end());
    let found = name_pattern
        .find_at(line_text, modifiers_end)
        .filter(|m| m.start() > 0)
        .ok_or_else(|| SharpenError::unresolved_name(symbol.qualified_name()))?;

    symbol.header.clear();
    symbol.body = line_text.to_string();
    symbol.range = Some(line);
    symbol.position = line.start();

    let after_modifiers = parse_attributes_and_modifiers(symbol, line_text)?;
    apply_declared_type(symbol, &line_text[after_modifiers.min(found.start())..found.start()])
}
