//! The reconstructed symbol and its region bookkeeping.

use std::sync::atomic::{AtomicU32, Ordering};

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::Span;
use crate::syntax::{AccessModifier, MemberModifiers, SymbolType};

/// Identity of a symbol, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Non-owning description of a symbol's parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub id: SymbolId,
    pub symbol_type: SymbolType,
    pub name: SmolStr,
}

impl ParentRef {
    pub fn of(symbol: &Symbol) -> Self {
        Self {
            id: symbol.id,
            symbol_type: symbol.symbol_type,
            name: symbol.name.clone(),
        }
    }
}

/// Folding region labels carried by the first and last member of a run.
///
/// `end` is `Some("")` for an unlabelled `#endregion`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionLabels {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RegionLabels {
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// A named, ordered sub-list of a symbol's children kept in one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup {
    pub name: String,
    pub symbols: Vec<SymbolId>,
}

impl RegionGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: Vec::new(),
        }
    }
}

/// Index of a transient gap-text record in the builder's trivia arena.
pub(crate) type TriviaId = usize;

/// Adjacency to the gap text before and after a symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TriviaLinks {
    pub before: Option<TriviaId>,
    pub after: Option<TriviaId>,
}

/// A reconstructed C# symbol.
///
/// Header, body and footer hold the text this symbol serializes to; for
/// containers the body is replaced by the joined text of the children.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub symbol_type: SymbolType,
    pub name: SmolStr,
    /// Enclosing namespace (or outer type) from the provider's detail string.
    pub namespace: Option<SmolStr>,
    pub return_type: Option<String>,
    pub access: AccessModifier,
    pub modifiers: MemberModifiers,
    /// Implemented/extended contract names as written.
    pub implements: Vec<String>,
    pub children: Vec<Symbol>,
    pub parent: Option<ParentRef>,
    pub regions: RegionLabels,
    pub region_groups: Vec<RegionGroup>,

    pub(crate) header: String,
    pub(crate) body: String,
    pub(crate) footer: String,
    /// Provider detail string (signature or qualified name).
    pub(crate) detail: String,
    /// Adjusted byte range in the source document.
    pub(crate) range: Option<TextRange>,
    /// Provider-reported start; used for document ordering.
    pub(crate) position: TextSize,
    pub(crate) name_end: Option<TextSize>,
    /// Provider name-selection span.
    pub(crate) selection: Option<Span>,
    pub(crate) file_scoped: bool,
    pub(crate) links: TriviaLinks,
}

impl Symbol {
    pub fn new(symbol_type: SymbolType, name: impl Into<SmolStr>) -> Self {
        Self {
            id: SymbolId::next(),
            symbol_type,
            name: name.into(),
            namespace: None,
            return_type: None,
            access: AccessModifier::None,
            modifiers: MemberModifiers::NONE,
            implements: Vec::new(),
            children: Vec::new(),
            parent: None,
            regions: RegionLabels::default(),
            region_groups: Vec::new(),
            header: String::new(),
            body: String::new(),
            footer: String::new(),
            detail: String::new(),
            range: None,
            position: TextSize::from(0),
            name_end: None,
            selection: None,
            file_scoped: false,
            links: TriviaLinks::default(),
        }
    }

    /// Leaf symbol with the given source text as its body.
    pub fn with_body(symbol_type: SymbolType, name: impl Into<SmolStr>, body: impl Into<String>) -> Self {
        let mut symbol = Self::new(symbol_type, name);
        symbol.body = body.into();
        symbol
    }

    /// Container symbol with the given opening and closing text.
    pub fn with_block(
        symbol_type: SymbolType,
        name: impl Into<SmolStr>,
        header: impl Into<String>,
        footer: impl Into<String>,
    ) -> Self {
        let mut symbol = Self::new(symbol_type, name);
        symbol.header = header.into();
        symbol.footer = footer.into();
        symbol
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Adjusted byte range of the declaration in the source document.
    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    /// Provider name-selection span, the position handed to a rename provider.
    pub fn selection(&self) -> Option<Span> {
        self.selection
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn can_have_children(&self) -> bool {
        self.symbol_type.can_have_children()
    }

    /// Whether this is a terminator-bodied (`namespace X;`) namespace.
    pub fn is_file_scoped(&self) -> bool {
        self.symbol_type == SymbolType::Namespace && self.file_scoped
    }

    /// Name qualified by the enclosing namespace, when known.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.to_string(),
        }
    }

    /// Name used for symbol matching: the member name without any explicit
    /// interface qualifier.
    pub fn member_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn child(&self, id: SymbolId) -> Option<&Symbol> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn child_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// Find a region group by name.
    pub fn region_group(&self, name: &str) -> Option<&RegionGroup> {
        self.region_groups.iter().find(|g| g.name == name)
    }

    /// Whether a child belongs to any region group of this symbol.
    pub fn in_region_group(&self, id: SymbolId) -> bool {
        self.region_groups.iter().any(|g| g.symbols.contains(&id))
    }

    /// Depth-first iterator over this symbol and all descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Symbol> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let symbol = stack.pop()?;
            stack.extend(symbol.children.iter().rev());
            Some(symbol)
        })
    }

    pub(crate) fn append_to_header(&mut self, text: &str) {
        if !self.header.is_empty() && !self.header.ends_with('\n') {
            self.header.push('\n');
        }
        self.header.push_str(text);
    }

    pub(crate) fn insert_on_header(&mut self, text: &str) {
        if !self.header.is_empty() && !self.header.starts_with('\n') {
            self.header.insert(0, '\n');
        }
        self.header.insert_str(0, text);
    }

    pub(crate) fn append_to_footer(&mut self, text: &str) {
        if !self.footer.is_empty() && !self.footer.ends_with('\n') {
            self.footer.push('\n');
        }
        self.footer.push_str(text);
    }
}
