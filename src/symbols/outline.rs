//! Outline entries as reported by an external language service.

use crate::base::Span;

/// Coarse symbol kind reported by an outline provider (LSP `SymbolKind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
}

impl OutlineKind {
    /// Map an LSP `SymbolKind` number (1-based).
    pub fn from_lsp(kind: u32) -> Option<Self> {
        const KINDS: [OutlineKind; 26] = [
            OutlineKind::File,
            OutlineKind::Module,
            OutlineKind::Namespace,
            OutlineKind::Package,
            OutlineKind::Class,
            OutlineKind::Method,
            OutlineKind::Property,
            OutlineKind::Field,
            OutlineKind::Constructor,
            OutlineKind::Enum,
            OutlineKind::Interface,
            OutlineKind::Function,
            OutlineKind::Variable,
            OutlineKind::Constant,
            OutlineKind::String,
            OutlineKind::Number,
            OutlineKind::Boolean,
            OutlineKind::Array,
            OutlineKind::Object,
            OutlineKind::Key,
            OutlineKind::Null,
            OutlineKind::EnumMember,
            OutlineKind::Struct,
            OutlineKind::Event,
            OutlineKind::Operator,
            OutlineKind::TypeParameter,
        ];
        KINDS.get((kind as usize).checked_sub(1)?).copied()
    }
}

/// One entry of a document outline.
///
/// `range` covers the declaration as the provider sees it; `selection_range`
/// covers only the name. Children mirror lexical containment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub kind: OutlineKind,
    /// Display name (`.ctor`, `this[]`, `IDisposable.Dispose`, ...).
    pub name: String,
    /// Provider detail: a signature or a namespace-qualified name.
    pub detail: String,
    pub range: Span,
    pub selection_range: Span,
    pub children: Vec<OutlineEntry>,
}

impl OutlineEntry {
    pub fn new(kind: OutlineKind, name: impl Into<String>, range: Span, selection_range: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            detail: String::new(),
            range,
            selection_range,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_children(mut self, children: Vec<OutlineEntry>) -> Self {
        self.children = children;
        self
    }

    /// Number of entries in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineEntry::count).sum::<usize>()
    }
}
