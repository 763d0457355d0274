//! Symbol tree reconstruction.
//!
//! Takes the coarse outline an external language service reports and computes
//! exact declaration text for every symbol, refines each symbol's subtype,
//! synthesizes `using` and namespace symbols, and reattaches the comments and
//! preprocessor directives found between symbols.
//!
//! ```text
//! outline entries ──▶ create (ranges, declarations) ──▶ hierarchy + order
//!                                                            │
//!               trivia ◀── reparent under namespaces ◀── directives scan
//! ```

mod declaration;
mod directives;
mod trivia;

use std::ops::Range;

use text_size::TextRange;

use crate::base::LineIndex;
use crate::core::Result;
use crate::symbols::classify;
use crate::symbols::outline::{OutlineEntry, OutlineKind};
use crate::symbols::symbol::{ParentRef, Symbol};
use crate::syntax::{AccessModifier, SymbolType};

/// Document text with its line table.
pub(crate) struct Source<'a> {
    pub(crate) text: &'a str,
    pub(crate) index: LineIndex,
}

impl<'a> Source<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            index: LineIndex::new(text),
        }
    }

    pub(crate) fn slice(&self, range: TextRange) -> &'a str {
        self.text.get(Range::<usize>::from(range)).unwrap_or_default()
    }
}

/// Builds a symbol tree for one document.
pub struct SymbolTreeBuilder<'a> {
    source: Source<'a>,
}

impl<'a> SymbolTreeBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            source: Source::new(text),
        }
    }

    /// Reconstruct the file-level symbols of the document from its outline.
    ///
    /// Returns an empty list when the outline is empty. Fails on structural
    /// problems: a container without an open delimiter, an unresolvable
    /// declaration, or an unsupported namespace layout.
    pub fn build(&self, entries: &[OutlineEntry]) -> Result<Vec<Symbol>> {
        if entries.is_empty() {
            tracing::debug!("[BUILD] outline is empty");
            return Ok(Vec::new());
        }

        let mut symbols = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(symbol) = self.create(entry, None, None)? {
                symbols.push(symbol);
            }
        }

        organize_parent_to_child_hierarchy(&mut symbols);
        order_by_position(&mut symbols);

        let directives = directives::scan(&self.source, &symbols)?;
        let mut symbols = add_using_and_namespace_symbols(directives, symbols);

        trivia::attach(&self.source, &mut symbols);

        tracing::debug!(
            "[BUILD] built {} file-level symbols from {} outline entries",
            symbols.len(),
            entries.iter().map(OutlineEntry::count).sum::<usize>()
        );
        Ok(symbols)
    }

    fn create(
        &self,
        entry: &OutlineEntry,
        parent: Option<&ParentRef>,
        parent_entry: Option<&OutlineEntry>,
    ) -> Result<Option<Symbol>> {
        let parent_type = parent.map(|p| p.symbol_type);
        let symbol_type =
            classify::subtype_from_provider_entry(entry.kind, &entry.name, &entry.detail, parent_type);
        if symbol_type == SymbolType::None {
            tracing::warn!(
                "[BUILD] dropping outline entry '{}' ({:?})",
                entry.name,
                entry.kind
            );
            return Ok(None);
        }

        let text = self.source.text;
        let provider_range = self.source.index.range(text, entry.range);
        let range = declaration::adjust_range(text, provider_range, symbol_type);

        let mut symbol = Symbol::new(symbol_type, entry.name.as_str());
        symbol.body = self.source.slice(range).to_string();
        symbol.detail = entry.detail.clone();
        symbol.range = Some(range);
        symbol.position = provider_range.start();
        symbol.name_end = Some(self.source.index.offset(text, entry.selection_range.end));
        symbol.selection = Some(entry.selection_range);
        symbol.parent = parent.cloned();
        symbol.access = classify::default_access(symbol_type, parent_type);

        declaration::parse_name_and_namespace(&mut symbol, parent);

        if is_primary_constructor(entry, symbol_type, parent_entry) {
            tracing::trace!("[BUILD] primary constructor of '{}'", symbol.name);
            symbol.symbol_type = SymbolType::PrimaryConstructor;
            symbol.body.clear();
            return Ok(Some(symbol));
        }

        let code = symbol.body.clone();
        declaration::parse_code_before_symbol_name(&self.source, &mut symbol, &code)?;

        if symbol.symbol_type == SymbolType::Method && symbol.name.contains('.') {
            symbol.access = AccessModifier::ExplicitInterface;
        }

        if !entry.children.is_empty() {
            if symbol.can_have_children() {
                self.create_children(&mut symbol, entry)?;
            } else {
                tracing::trace!(
                    "[BUILD] ignoring {} nested entries of {} '{}'",
                    entry.children.len(),
                    symbol.symbol_type,
                    symbol.name
                );
            }
        }

        Ok(Some(symbol))
    }

    fn create_children(&self, symbol: &mut Symbol, entry: &OutlineEntry) -> Result<()> {
        let me = ParentRef::of(symbol);
        let mut children = Vec::with_capacity(entry.children.len());
        for child in &entry.children {
            if let Some(child) = self.create(child, Some(&me), Some(entry))? {
                children.push(child);
            }
        }

        let has_primary = children
            .iter()
            .any(|c| c.symbol_type == SymbolType::PrimaryConstructor);
        if has_primary
            && let Some(parameters) = symbol
                .name_end
                .and_then(|end| declaration::parameter_list(self.source.text, end))
        {
            let before = children.len();
            children.retain(|c| {
                c.symbol_type == SymbolType::PrimaryConstructor || !parameters.contains(c.position)
            });
            tracing::trace!(
                "[BUILD] excised {} parameter-declared members of '{}'",
                before - children.len(),
                symbol.name
            );
        }

        symbol.children = children;
        Ok(())
    }
}

/// Convenience for [`SymbolTreeBuilder::build`].
pub fn build(text: &str, entries: &[OutlineEntry]) -> Result<Vec<Symbol>> {
    SymbolTreeBuilder::new(text).build(entries)
}

/// A constructor-shaped entry that shares its type's name position or range.
fn is_primary_constructor(
    entry: &OutlineEntry,
    symbol_type: SymbolType,
    parent_entry: Option<&OutlineEntry>,
) -> bool {
    let Some(parent) = parent_entry else {
        return false;
    };
    let constructor_shaped = matches!(symbol_type, SymbolType::Constructor)
        || (entry.kind == OutlineKind::Method && entry.range == parent.range);

    constructor_shaped
        && (entry.selection_range.start == parent.selection_range.start || entry.range == parent.range)
}

/// Move file-level types whose namespace names another file-level container
/// under that container.
fn organize_parent_to_child_hierarchy(symbols: &mut Vec<Symbol>) {
    let parents: Vec<usize> = (0..symbols.len())
        .filter(|&i| symbols[i].can_have_children())
        .collect();
    if parents.is_empty() {
        return;
    }

    let moves: Vec<(usize, usize)> = (0..symbols.len())
        .filter(|&i| symbols[i].symbol_type.can_be_on_file_level())
        .filter_map(|child| {
            let namespace = symbols[child].namespace.as_deref()?;
            parents
                .iter()
                .copied()
                .find(|&p| p != child && namespace.ends_with(symbols[p].name.as_str()))
                .map(|parent| (child, parent))
        })
        .collect();
    if moves.is_empty() {
        return;
    }

    let mut slots: Vec<Option<Symbol>> = std::mem::take(symbols).into_iter().map(Some).collect();
    for (child, parent) in moves {
        if slots[parent].is_none() {
            continue;
        }
        let Some(mut moved) = slots[child].take() else {
            continue;
        };
        if let Some(parent) = slots[parent].as_mut() {
            tracing::trace!("[BUILD] moving '{}' under '{}'", moved.name, parent.name);
            moved.namespace = None;
            moved.parent = Some(ParentRef::of(parent));
            parent.children.push(moved);
        }
    }
    *symbols = slots.into_iter().flatten().collect();
}

/// Stable sort by provider position, recursively.
fn order_by_position(symbols: &mut [Symbol]) {
    symbols.sort_by_key(|s| s.position);
    for symbol in symbols.iter_mut() {
        order_by_position(&mut symbol.children);
    }
}

/// Place parentless symbols under their enclosing namespace and put the
/// synthetic symbols at file level.
fn add_using_and_namespace_symbols(mut directives: Vec<Symbol>, symbols: Vec<Symbol>) -> Vec<Symbol> {
    let namespaces: Vec<usize> = (0..directives.len())
        .filter(|&i| directives[i].symbol_type == SymbolType::Namespace)
        .collect();
    let sole_file_scoped = match namespaces.as_slice() {
        [only] if directives[*only].file_scoped => Some(*only),
        _ => None,
    };

    let mut file_level = Vec::new();
    for mut symbol in symbols {
        let target = sole_file_scoped.or_else(|| {
            namespaces
                .iter()
                .copied()
                .filter(|&n| directives[n].range.is_some_and(|r| r.contains(symbol.position)))
                .min_by_key(|&n| directives[n].range.map(|r| r.end()))
        });

        match target {
            Some(namespace) => {
                symbol.parent = Some(ParentRef::of(&directives[namespace]));
                directives[namespace].children.push(symbol);
            }
            None => file_level.push(symbol),
        }
    }

    directives.extend(file_level);
    order_by_position(&mut directives);
    directives
}
