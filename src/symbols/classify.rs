//! Symbol classification: provider kinds and declaration text to subtypes.

use crate::core::{Result, SharpenError};
use crate::syntax::patterns;
use crate::syntax::{AccessModifier, SymbolType};

use super::outline::OutlineKind;

/// Subtype of a provider entry before its declaration text is inspected.
///
/// Members reported under an event (its accessor pair) classify as
/// [`SymbolType::None`] and are dropped by the builder, as are kinds that
/// have no C# counterpart.
pub fn subtype_from_provider_entry(
    kind: OutlineKind,
    name: &str,
    detail: &str,
    parent: Option<SymbolType>,
) -> SymbolType {
    if parent == Some(SymbolType::Event) {
        return SymbolType::None;
    }

    match kind {
        OutlineKind::Namespace | OutlineKind::Module | OutlineKind::Package => {
            SymbolType::Namespace
        }
        OutlineKind::Class => SymbolType::Class,
        OutlineKind::Interface => SymbolType::Interface,
        OutlineKind::Enum => SymbolType::Enum,
        OutlineKind::Struct => SymbolType::Struct,
        OutlineKind::Event => SymbolType::Event,
        OutlineKind::Constant => SymbolType::Constant,
        OutlineKind::Field => SymbolType::Field,
        OutlineKind::Operator => SymbolType::Operator,
        OutlineKind::File => SymbolType::File,
        OutlineKind::Property if name.ends_with("this[]") => SymbolType::Indexer,
        OutlineKind::Property => SymbolType::Property,
        OutlineKind::Constructor if name == ".cctor" => SymbolType::StaticConstructor,
        OutlineKind::Constructor => SymbolType::Constructor,
        OutlineKind::Method | OutlineKind::Function => match name {
            ".ctor" => SymbolType::Constructor,
            ".cctor" => SymbolType::StaticConstructor,
            "Finalize" if detail.starts_with('~') => SymbolType::Finalizer,
            _ if name.starts_with('~') => SymbolType::Finalizer,
            _ => SymbolType::Method,
        },
        _ => SymbolType::None,
    }
}

/// Visibility a symbol has when its declaration states none.
pub fn default_access(symbol_type: SymbolType, parent: Option<SymbolType>) -> AccessModifier {
    if symbol_type.is_namespace_level()
        || matches!(
            symbol_type,
            SymbolType::Enum | SymbolType::Finalizer | SymbolType::StaticConstructor
        )
    {
        return AccessModifier::None;
    }
    if symbol_type == SymbolType::Operator {
        return AccessModifier::Public;
    }

    match parent {
        None => AccessModifier::Internal,
        Some(parent) if parent.is_namespace_level() => AccessModifier::Internal,
        Some(SymbolType::Interface) => AccessModifier::Public,
        Some(_) => AccessModifier::Private,
    }
}

/// What the text between the modifiers and the name declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredType {
    pub symbol_type: Option<SymbolType>,
    pub return_type: Option<String>,
}

/// Resolve a declaration keyword and/or return type from the code before a
/// symbol's name (modifiers and attributes already removed).
pub fn refine_from_declaration(code: &str) -> Result<DeclaredType> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(DeclaredType::default());
    }

    if let Some(captures) = patterns::symbol_type_keywords().captures(code) {
        return Ok(DeclaredType {
            symbol_type: Some(SymbolType::from_keyword(&captures["keywords"])?),
            return_type: None,
        });
    }

    if let Some(captures) = patterns::symbol_type_with_return_type_keywords().captures(code) {
        let keywords = &captures["keywords"];
        let split = patterns::symbol_type_then_return_type()
            .captures(keywords)
            .or_else(|| patterns::return_type_then_symbol_type().captures(keywords))
            .ok_or_else(|| SharpenError::UnknownKeyword(keywords.to_string()))?;

        return Ok(DeclaredType {
            symbol_type: Some(SymbolType::from_keyword(split["symbolType"].trim())?),
            return_type: Some(split["returnType"].to_string()),
        });
    }

    Ok(DeclaredType {
        symbol_type: None,
        return_type: Some(code.to_string()),
    })
}
