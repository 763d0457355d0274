//! Closed enumerations describing C# declarations.
//!
//! - [`SymbolType`] - the precise subtype of a reconstructed symbol
//! - [`AccessModifier`] - declared or defaulted visibility
//! - [`MemberModifiers`] - combinable member modifier keywords

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::core::SharpenError;

// ============================================================================
// SYMBOL TYPE
// ============================================================================

/// The precise subtype of a symbol.
///
/// Declaration order is meaningful: every variant up to and including
/// [`SymbolType::Namespace`] is a namespace-level construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SymbolType {
    #[default]
    None,

    File,
    NonCodeblock,

    Using,
    Namespace,

    Delegate,
    Interface,
    Class,
    Struct,
    Enum,
    RecordClass,
    RecordStruct,

    Event,
    Constant,
    Property,
    Field,

    StaticConstructor,
    PrimaryConstructor,
    Constructor,
    Indexer,
    Finalizer,
    Method,
    Operator,
}

impl SymbolType {
    /// Singular label used by filters, type precedence lists and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolType::Using => "using",
            SymbolType::Namespace => "namespace",
            SymbolType::Class => "class",
            SymbolType::Interface => "interface",
            SymbolType::Enum => "enum",
            SymbolType::Struct => "struct",
            SymbolType::RecordClass => "record",
            SymbolType::RecordStruct => "record struct",
            SymbolType::Delegate => "delegate",
            SymbolType::Event => "event",
            SymbolType::Constant => "constant",
            SymbolType::Property => "property",
            SymbolType::Field => "field",
            SymbolType::StaticConstructor => "static constructor",
            SymbolType::PrimaryConstructor => "primary constructor",
            SymbolType::Constructor => "constructor",
            SymbolType::Indexer => "indexer",
            SymbolType::Finalizer => "finalizer",
            SymbolType::Method => "method",
            SymbolType::Operator => "operator",
            SymbolType::None | SymbolType::File | SymbolType::NonCodeblock => "noType",
        }
    }

    /// Plural label used in generated region names.
    pub fn plural_label(&self) -> &'static str {
        match self {
            SymbolType::Using => "usings",
            SymbolType::Namespace => "namespaces",
            SymbolType::Class => "classes",
            SymbolType::Interface => "interfaces",
            SymbolType::Enum => "enums",
            SymbolType::Struct => "structs",
            SymbolType::RecordClass => "records",
            SymbolType::RecordStruct => "record structs",
            SymbolType::Delegate => "delegates",
            SymbolType::Event => "events",
            SymbolType::Constant => "constants",
            SymbolType::Property => "properties",
            SymbolType::Field => "fields",
            SymbolType::StaticConstructor => "static constructors",
            SymbolType::PrimaryConstructor => "primary constructors",
            SymbolType::Constructor => "constructors",
            SymbolType::Indexer => "indexers",
            SymbolType::Finalizer => "finalizers",
            SymbolType::Method => "methods",
            SymbolType::Operator => "operators",
            SymbolType::None | SymbolType::File | SymbolType::NonCodeblock => "noType",
        }
    }

    /// Whether symbols of this type own child symbols.
    pub fn can_have_children(&self) -> bool {
        matches!(
            self,
            SymbolType::Class
                | SymbolType::Interface
                | SymbolType::Namespace
                | SymbolType::RecordClass
                | SymbolType::RecordStruct
                | SymbolType::Struct
        )
    }

    /// Whether the type may legally appear directly in a file.
    pub fn can_be_on_file_level(&self) -> bool {
        matches!(
            self,
            SymbolType::Class
                | SymbolType::Delegate
                | SymbolType::Enum
                | SymbolType::Interface
                | SymbolType::Namespace
                | SymbolType::RecordClass
                | SymbolType::RecordStruct
                | SymbolType::Struct
        )
    }

    /// `none`, `file`, non-codeblock, `using` and `namespace`.
    pub fn is_namespace_level(&self) -> bool {
        *self <= SymbolType::Namespace
    }

    /// Map a declaration keyword (`class`, `record struct`, `const`, ...) to a type.
    pub fn from_keyword(keyword: &str) -> Result<Self, SharpenError> {
        let normalized = keyword.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.as_str() {
            "class" => Ok(SymbolType::Class),
            "const" => Ok(SymbolType::Constant),
            "delegate" => Ok(SymbolType::Delegate),
            "enum" => Ok(SymbolType::Enum),
            "event" => Ok(SymbolType::Event),
            "interface" => Ok(SymbolType::Interface),
            "record" | "record class" => Ok(SymbolType::RecordClass),
            "record struct" => Ok(SymbolType::RecordStruct),
            "struct" => Ok(SymbolType::Struct),
            kw if kw == "operator" || kw.ends_with(" operator") => Ok(SymbolType::Operator),
            _ => Err(SharpenError::UnknownKeyword(keyword.to_string())),
        }
    }

    /// Parse a comma-delimited list of type names, skipping unknown entries.
    pub fn from_delimited(types: &str) -> Vec<Self> {
        types
            .split(',')
            .filter_map(|t| t.trim().parse().ok())
            .collect()
    }
}

impl FromStr for SymbolType {
    type Err = SharpenError;

    /// Accepts the singular labels as well as their space-less forms
    /// (`record struct` and `recordstruct`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        let symbol_type = match compact.as_str() {
            "using" => SymbolType::Using,
            "namespace" => SymbolType::Namespace,
            "class" => SymbolType::Class,
            "interface" => SymbolType::Interface,
            "enum" => SymbolType::Enum,
            "struct" => SymbolType::Struct,
            "record" | "recordclass" => SymbolType::RecordClass,
            "recordstruct" => SymbolType::RecordStruct,
            "delegate" => SymbolType::Delegate,
            "event" => SymbolType::Event,
            "constant" | "const" => SymbolType::Constant,
            "property" => SymbolType::Property,
            "field" => SymbolType::Field,
            "staticconstructor" => SymbolType::StaticConstructor,
            "primaryconstructor" => SymbolType::PrimaryConstructor,
            "constructor" => SymbolType::Constructor,
            "indexer" => SymbolType::Indexer,
            "finalizer" => SymbolType::Finalizer,
            "method" => SymbolType::Method,
            "operator" => SymbolType::Operator,
            _ => return Err(SharpenError::config(format!("unknown symbol type '{s}'"))),
        };
        Ok(symbol_type)
    }
}

impl TryFrom<String> for SymbolType {
    type Error = SharpenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SymbolType> for String {
    fn from(value: SymbolType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ACCESS MODIFIER
// ============================================================================

/// Declared or defaulted visibility, ordered by sort rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AccessModifier {
    #[default]
    None,
    Public,
    /// Explicit interface implementation; implicitly public.
    ExplicitInterface,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
    File,
}

impl AccessModifier {
    pub fn label(&self) -> &'static str {
        match self {
            AccessModifier::None => "none",
            AccessModifier::Public => "public",
            AccessModifier::ExplicitInterface => "explicit interface",
            AccessModifier::Internal => "internal",
            AccessModifier::Protected => "protected",
            AccessModifier::Private => "private",
            AccessModifier::ProtectedInternal => "protected internal",
            AccessModifier::PrivateProtected => "private protected",
            AccessModifier::File => "file",
        }
    }

    /// Find the visibility stated in a run of modifier keywords.
    ///
    /// Compound forms win over their parts; `explicit interface` is never
    /// stated in source and is not recognized here.
    pub fn from_modifiers(modifiers: &str) -> Self {
        let normalized = modifiers.split_whitespace().collect::<Vec<_>>().join(" ");
        let has = |word: &str| {
            normalized == word
                || normalized.starts_with(&format!("{word} "))
                || normalized.ends_with(&format!(" {word}"))
                || normalized.contains(&format!(" {word} "))
        };

        if has("public") {
            AccessModifier::Public
        } else if has("protected internal") || has("internal protected") {
            AccessModifier::ProtectedInternal
        } else if has("private protected") || has("protected private") {
            AccessModifier::PrivateProtected
        } else if has("internal") {
            AccessModifier::Internal
        } else if has("protected") {
            AccessModifier::Protected
        } else if has("private") {
            AccessModifier::Private
        } else if has("file") {
            AccessModifier::File
        } else {
            AccessModifier::None
        }
    }

    /// Parse a comma-delimited list of visibilities, skipping unknown entries.
    pub fn from_delimited(modifiers: &str) -> Vec<Self> {
        modifiers
            .split(',')
            .map(|m| m.trim())
            .filter_map(|m| {
                if m == "explicit interface" {
                    return Some(AccessModifier::ExplicitInterface);
                }
                match AccessModifier::from_modifiers(m) {
                    AccessModifier::None => None,
                    access => Some(access),
                }
            })
            .collect()
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// MEMBER MODIFIERS
// ============================================================================

/// Bit-set of member modifier keywords.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemberModifiers(u16);

impl MemberModifiers {
    pub const NONE: Self = Self(0);
    pub const STATIC: Self = Self(1 << 0);
    pub const EXTERN: Self = Self(1 << 1);
    pub const NEW: Self = Self(1 << 2);
    pub const VIRTUAL: Self = Self(1 << 3);
    pub const PARTIAL: Self = Self(1 << 4);
    pub const ABSTRACT: Self = Self(1 << 5);
    pub const SEALED: Self = Self(1 << 6);
    pub const OVERRIDE: Self = Self(1 << 7);
    pub const READONLY: Self = Self(1 << 8);
    pub const UNSAFE: Self = Self(1 << 9);
    pub const VOLATILE: Self = Self(1 << 10);
    pub const ASYNC: Self = Self(1 << 11);

    const KEYWORDS: [(&'static str, MemberModifiers); 12] = [
        ("static", Self::STATIC),
        ("extern", Self::EXTERN),
        ("new", Self::NEW),
        ("virtual", Self::VIRTUAL),
        ("partial", Self::PARTIAL),
        ("abstract", Self::ABSTRACT),
        ("sealed", Self::SEALED),
        ("override", Self::OVERRIDE),
        ("readonly", Self::READONLY),
        ("unsafe", Self::UNSAFE),
        ("volatile", Self::VOLATILE),
        ("async", Self::ASYNC),
    ];

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is set.
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Collect the modifier keywords present in a run of modifier text.
    pub fn from_modifiers(modifiers: &str) -> Self {
        modifiers
            .split_whitespace()
            .filter_map(|word| {
                Self::KEYWORDS
                    .iter()
                    .find(|(keyword, _)| *keyword == word)
                    .map(|(_, flag)| *flag)
            })
            .fold(Self::NONE, |acc, flag| acc | flag)
    }

    /// Parse a comma-delimited list of modifier keywords.
    pub fn from_delimited(modifiers: &str) -> Self {
        Self::from_modifiers(&modifiers.replace(',', " "))
    }
}

impl BitOr for MemberModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MemberModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for MemberModifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for MemberModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = Self::KEYWORDS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(keyword, _)| *keyword)
            .collect();
        f.write_str(&words.join(" "))
    }
}

impl fmt::Debug for MemberModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberModifiers({self})")
    }
}
