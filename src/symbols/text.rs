//! Serialization of a symbol tree back to source text.
//!
//! `text = region start + header + (body | joined children) + footer + region end`,
//! applied recursively. Primary constructors never serialize; their parameter
//! list already lives in the owning type's header.

use crate::syntax::SymbolType;

use super::symbol::Symbol;

/// Default indentation unit for region markers.
pub const DEFAULT_INDENTATION: &str = "    ";

/// Renders symbols with a configured indentation unit.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer<'a> {
    indentation: &'a str,
}

impl Default for TextRenderer<'_> {
    fn default() -> Self {
        Self {
            indentation: DEFAULT_INDENTATION,
        }
    }
}

impl<'a> TextRenderer<'a> {
    pub fn new(indentation: &'a str) -> Self {
        Self { indentation }
    }

    /// Serialize file-level symbols.
    pub fn render(&self, symbols: &[Symbol]) -> String {
        self.join(None, symbols)
    }

    /// Full text of a symbol including its region markers.
    pub fn text(&self, symbol: &Symbol, parent: Option<&Symbol>) -> String {
        let inner = self.inner_text(symbol);
        let spaced = symbol.can_have_children() || is_multi_line(symbol);
        let indent = self.region_indent(parent);

        let mut text = String::with_capacity(inner.len() + 32);
        if let Some(label) = &symbol.regions.start {
            text.push_str(&indent);
            text.push_str("#region ");
            text.push_str(label);
            text.push('\n');
            if spaced {
                text.push('\n');
            }
        }
        text.push_str(&inner);
        if let Some(label) = &symbol.regions.end {
            if spaced {
                text.push('\n');
            }
            text.push('\n');
            text.push_str(&indent);
            text.push_str("#endregion");
            if !label.is_empty() {
                text.push(' ');
                text.push_str(label);
            }
        }
        text
    }

    /// Text of a symbol without region markers.
    pub fn inner_text(&self, symbol: &Symbol) -> String {
        let content = if symbol.can_have_children() {
            self.join(Some(symbol), &symbol.children)
        } else {
            symbol.body.clone()
        };

        [symbol.header.as_str(), content.as_str(), symbol.footer.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Join sibling symbols with the delimiter each adjacent pair calls for.
    pub fn join(&self, parent: Option<&Symbol>, symbols: &[Symbol]) -> String {
        let mut text = String::new();
        let mut previous: Option<&Symbol> = None;

        for symbol in symbols
            .iter()
            .filter(|s| s.symbol_type != SymbolType::PrimaryConstructor)
        {
            text.push_str(join_delimiter(parent, previous, symbol));
            text.push_str(&self.text(symbol, parent));
            previous = Some(symbol);
        }
        text
    }

    fn region_indent(&self, parent: Option<&Symbol>) -> String {
        match parent {
            Some(parent) if parent.header.ends_with('{') => {
                let last_line = parent.header.rsplit('\n').next().unwrap_or_default();
                let outer: String = last_line
                    .chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .collect();
                format!("{outer}{}", self.indentation)
            }
            _ => String::new(),
        }
    }
}

/// Whether a symbol serializes to more than one line.
pub fn is_multi_line(symbol: &Symbol) -> bool {
    if symbol.can_have_children() {
        return true;
    }
    let parts = [&symbol.header, &symbol.body, &symbol.footer];
    parts.iter().any(|p| p.contains('\n')) || parts.iter().filter(|p| !p.is_empty()).count() > 1
}

fn join_delimiter(parent: Option<&Symbol>, previous: Option<&Symbol>, current: &Symbol) -> &'static str {
    let Some(previous) = previous else {
        return match parent {
            Some(parent) if parent.is_file_scoped() => "\n",
            _ => "",
        };
    };

    if previous.symbol_type == current.symbol_type {
        if parent.is_some_and(|p| p.symbol_type == SymbolType::Interface) {
            return "\n";
        }
        match current.symbol_type {
            SymbolType::Using => return "\n",
            SymbolType::Delegate
            | SymbolType::Event
            | SymbolType::Constant
            | SymbolType::Property
            | SymbolType::Field
            | SymbolType::Operator => {
                return if is_multi_line(previous) || is_multi_line(current) {
                    "\n\n"
                } else {
                    "\n"
                };
            }
            _ => {}
        }
    }

    "\n\n"
}

impl Symbol {
    /// Serialized text with the default indentation unit.
    pub fn text(&self) -> String {
        TextRenderer::default().text(self, None)
    }
}
