//! Whole-document scan for `using` directives and namespace declarations,
//! which the outline provider does not report.

use text_size::{TextRange, TextSize};

use crate::core::text_utils::blank_out_range;
use crate::core::{Result, SharpenError};
use crate::symbols::symbol::Symbol;
use crate::syntax::patterns;
use crate::syntax::SymbolType;

use super::Source;
use super::declaration::to_size;

/// Scan for synthetic using and namespace symbols, ordered by position.
pub(super) fn scan(source: &Source<'_>, symbols: &[Symbol]) -> Result<Vec<Symbol>> {
    let mut stripped = strip_symbol_and_comment_text(source.text, symbols);

    let mut found = scan_usings(&mut stripped);
    let namespaces = scan_namespaces(source, &mut stripped)?;

    tracing::debug!(
        "[BUILD] found {} using directives and {} namespaces",
        found.len(),
        namespaces.len()
    );

    found.extend(namespaces);
    found.sort_by_key(|s| s.position);
    Ok(found)
}

/// Blank out provider symbols and comments so only directive-level text is
/// left for scanning. Offsets stay valid.
fn strip_symbol_and_comment_text(text: &str, symbols: &[Symbol]) -> String {
    let mut stripped = text.to_string();

    for range in symbols.iter().filter_map(|s| s.range) {
        let (start, end) = (usize::from(range.start()), usize::from(range.end()));
        if end <= stripped.len() {
            blank_out_range(&mut stripped, start, end);
        }
    }

    for pattern in [
        patterns::multi_line_comment(),
        patterns::xml_comment(),
        patterns::single_line_comment(),
    ] {
        let spans: Vec<_> = pattern
            .find_iter(&stripped)
            .map(|m| (m.start(), m.end()))
            .collect();
        for (start, end) in spans {
            blank_out_range(&mut stripped, start, end);
        }
    }

    stripped
}

fn scan_usings(stripped: &mut String) -> Vec<Symbol> {
    let found: Vec<_> = patterns::using_directive()
        .captures_iter(stripped.as_str())
        .filter_map(|c| {
            let directive = c.name("directive")?;
            let namespace = c.name("namespace")?;
            Some((directive.start(), directive.as_str().to_string(), namespace.as_str().to_string()))
        })
        .collect();

    found
        .into_iter()
        .map(|(start, directive, namespace)| {
            blank_out_range(stripped, start, start + directive.len());

            let mut symbol = Symbol::with_body(SymbolType::Using, namespace, directive.trim());
            symbol.range = Some(TextRange::at(to_size(start), TextSize::of(directive.as_str())));
            symbol.position = to_size(start);
            symbol
        })
        .collect()
}

fn scan_namespaces(source: &Source<'_>, stripped: &mut String) -> Result<Vec<Symbol>> {
    let mut namespaces = Vec::new();

    let file_scoped: Vec<_> = patterns::file_scoped_namespace()
        .captures_iter(stripped.as_str())
        .filter_map(|c| NamespaceMatch::from_captures(&c))
        .collect();
    if file_scoped.len() > 1 {
        return Err(SharpenError::namespaces(
            "multiple file-scoped namespace declarations",
        ));
    }
    for found in file_scoped {
        blank_out_range(stripped, found.start, found.start + found.declaration_len);

        let mut symbol = Symbol::with_block(
            SymbolType::Namespace,
            found.namespace.as_str(),
            format!("{};", found.signature.trim()),
            "",
        );
        // A file-scoped namespace extends to the end of the document.
        symbol.range = Some(TextRange::new(to_size(found.start), source.index.len()));
        symbol.name_end = Some(to_size(found.start + found.signature.len()));
        symbol.position = to_size(found.start);
        symbol.file_scoped = true;
        namespaces.push(symbol);
    }

    let bodied: Vec<_> = patterns::bodied_namespace()
        .captures_iter(stripped.as_str())
        .filter_map(|c| NamespaceMatch::from_captures(&c))
        .collect();
    for found in bodied {
        blank_out_range(stripped, found.start, found.start + found.declaration_len);

        let signature = found.signature.trim_end();
        let indent: String = signature.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
        let mut symbol = Symbol::with_block(
            SymbolType::Namespace,
            found.namespace.as_str(),
            format!("{signature}\n{indent}{{"),
            format!("{indent}}}"),
        );
        symbol.range = Some(TextRange::at(to_size(found.start), to_size(found.declaration_len)));
        symbol.name_end = Some(to_size(found.start + found.signature.len()));
        symbol.position = to_size(found.start);
        namespaces.push(symbol);
    }

    if namespaces.len() > 1 && namespaces.iter().any(|n| n.file_scoped) {
        return Err(SharpenError::namespaces(
            "a file-scoped namespace cannot be combined with other namespace declarations",
        ));
    }

    Ok(namespaces)
}

struct NamespaceMatch {
    start: usize,
    declaration_len: usize,
    signature: String,
    namespace: String,
}

impl NamespaceMatch {
    fn from_captures(captures: &regex::Captures<'_>) -> Option<Self> {
        let declaration = captures.name("declaration")?;
        Some(Self {
            start: declaration.start(),
            declaration_len: declaration.len(),
            signature: captures.name("signature")?.as_str().to_string(),
            namespace: captures.name("namespace")?.as_str().to_string(),
        })
    }
}
