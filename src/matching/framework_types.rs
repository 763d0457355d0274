//! Built-in type keywords and their framework type names.

use std::fmt;

use crate::syntax::patterns;

/// A C# built-in type keyword, or `Other` for any other type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CSharpType {
    #[default]
    None,
    Bool,
    Byte,
    Char,
    Decimal,
    Double,
    Dynamic,
    Float,
    Int,
    Long,
    NInt,
    NUInt,
    Object,
    SByte,
    Short,
    String,
    UInt,
    ULong,
    UShort,
    Var,
    Void,
    Other,
}

impl CSharpType {
    /// Classify a written type name.
    ///
    /// Keywords, bare framework names and `System.`-qualified framework names
    /// all map to the keyword they alias. `None` input maps to [`CSharpType::None`].
    pub fn from_type_name(type_name: Option<&str>) -> Self {
        let Some(type_name) = type_name.map(str::trim) else {
            return CSharpType::None;
        };
        let bare = type_name.strip_prefix("System.").unwrap_or(type_name);

        match (type_name, bare) {
            ("bool", _) | (_, "Boolean") => CSharpType::Bool,
            ("byte", _) | (_, "Byte") => CSharpType::Byte,
            ("char", _) | (_, "Char") => CSharpType::Char,
            ("decimal", _) | (_, "Decimal") => CSharpType::Decimal,
            ("double", _) | (_, "Double") => CSharpType::Double,
            ("float", _) | (_, "Single") => CSharpType::Float,
            ("int", _) | (_, "Int32") => CSharpType::Int,
            ("long", _) | (_, "Int64") => CSharpType::Long,
            ("nint", _) | (_, "IntPtr") => CSharpType::NInt,
            ("nuint", _) | (_, "UIntPtr") => CSharpType::NUInt,
            ("sbyte", _) | (_, "SByte") => CSharpType::SByte,
            ("short", _) | (_, "Int16") => CSharpType::Short,
            ("string", _) | (_, "String") => CSharpType::String,
            ("uint", _) | (_, "UInt32") => CSharpType::UInt,
            ("ulong", _) | (_, "UInt64") => CSharpType::ULong,
            ("ushort", _) | (_, "UInt16") => CSharpType::UShort,
            ("object", _) | (_, "Object") => CSharpType::Object,
            ("dynamic", _) => CSharpType::Dynamic,
            ("var", _) => CSharpType::Var,
            ("void", _) => CSharpType::Void,
            _ => CSharpType::Other,
        }
    }

    /// The language keyword, if the type has one.
    pub fn keyword(&self) -> Option<&'static str> {
        let keyword = match self {
            CSharpType::None | CSharpType::Other => return None,
            CSharpType::Bool => "bool",
            CSharpType::Byte => "byte",
            CSharpType::Char => "char",
            CSharpType::Decimal => "decimal",
            CSharpType::Double => "double",
            CSharpType::Dynamic => "dynamic",
            CSharpType::Float => "float",
            CSharpType::Int => "int",
            CSharpType::Long => "long",
            CSharpType::NInt => "nint",
            CSharpType::NUInt => "nuint",
            CSharpType::Object => "object",
            CSharpType::SByte => "sbyte",
            CSharpType::Short => "short",
            CSharpType::String => "string",
            CSharpType::UInt => "uint",
            CSharpType::ULong => "ulong",
            CSharpType::UShort => "ushort",
            CSharpType::Var => "var",
            CSharpType::Void => "void",
        };
        Some(keyword)
    }

    pub fn is_keyword_type(&self) -> bool {
        self.keyword().is_some()
    }
}

impl fmt::Display for CSharpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("other"))
    }
}

/// Rewrite framework type names inside a type expression to their keywords.
///
/// `System.Int128` has no keyword and is shortened to `Int128`.
pub fn replace_framework_types(type_expression: &str) -> String {
    patterns::framework_types()
        .replace_all(type_expression, |captures: &regex::Captures<'_>| {
            let found = &captures[0];
            match CSharpType::from_type_name(Some(found)).keyword() {
                Some(keyword) => keyword.to_string(),
                None => found.trim_start_matches("System.").to_string(),
            }
        })
        .into_owned()
}
