//! Lexical patterns for C# declaration fragments.
//!
//! Fragments are plain strings composed into compiled [`Regex`] values on
//! first use. Compiled patterns carry no scan state, so every scan starts
//! fresh; whole-document scans use multi-line mode (`(?m)`), per-symbol scans
//! anchor at the start of the symbol text.

use std::sync::OnceLock;

use regex::Regex;

// ============================================================================
// FRAGMENTS
// ============================================================================

/// Identifier.
pub const NAME: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";

/// Nullable and array suffixes (`?`, `[]`, `[]?`, ...).
pub const NULLABLE_ARRAY: &str = r"\??(\[\]\??)*";

/// Leading attribute lists, captured as `attributes`.
pub const ATTRIBUTES: &str = r"(?P<attributes>(\s*\[([^\[\]\r\n]|\[[^\[\]\r\n]*\])*\]\s*)*)?";

/// Leading modifier keywords, captured as `modifiers`.
pub const MODIFIERS: &str = r"(?P<modifiers>(\s*(new|public|protected|private|internal|protected\s+internal|private\s+protected|file|static|extern|virtual|partial|abstract|sealed|override|readonly|unsafe|volatile|async|required)\s+)*)?";

/// Framework type names that have a language keyword.
pub const FRAMEWORK_TYPES: &str = r"\b(((System\.)?((Boolean)|(S?Byte)|(Char)|(Decimal)|(Double)|(Single)|(U?Int(16|32|64|Ptr))|(Object)|(String)))|(System\.Int128))\b";

/// Dotted namespace name.
pub fn namespace() -> String {
    format!(r"({NAME}(\.{NAME})*)")
}

/// Type name with optional generic argument list.
pub fn type_with_generics() -> String {
    format!(r"{NAME}(<.*?>)?")
}

fn type_with_generics_nullable_array() -> String {
    format!("({}{NULLABLE_ARRAY})", type_with_generics())
}

/// Tuple type with optionally named elements.
pub fn tuple_type() -> String {
    let element = format!(r"{}(\s+{NAME})?", type_with_generics_nullable_array());
    format!(r"(\({element}(,\s*{element})+\){NULLABLE_ARRAY})")
}

/// Any type expression: generic/nullable/array type or tuple.
pub fn any_type() -> String {
    format!("({}|{})", type_with_generics_nullable_array(), tuple_type())
}

fn expand(template: &str) -> String {
    template
        .replace("{attributes}", ATTRIBUTES)
        .replace("{modifiers}", MODIFIERS)
        .replace("{any_type}", &any_type())
        .replace("{type}", &type_with_generics())
        .replace("{namespace}", &namespace())
        .replace("{name}", NAME)
}

fn compile(template: &str) -> Regex {
    Regex::new(&expand(template)).expect("built-in pattern compiles")
}

macro_rules! pattern {
    ($(#[$meta:meta])* $fn_name:ident = $template:expr) => {
        $(#[$meta])*
        pub fn $fn_name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| compile($template))
        }
    };
}

// ============================================================================
// DECLARATIONS
// ============================================================================

pattern!(
    /// Attributes then modifiers at the start of a symbol's text.
    attributes_and_modifiers = r"^{attributes}{modifiers}"
);

pattern!(
    /// Container/declaration keywords occupying the whole text before a name.
    symbol_type_keywords =
        r"^(?P<keywords>(interface|record(\s+class)?|class|record(\s+struct)?|struct|enum))$"
);

pattern!(
    /// Keywords that carry a return/value type (`delegate T`, `T operator`, ...).
    symbol_type_with_return_type_keywords = r"(?P<keywords>(\bdelegate\s+{any_type}|\bevent\s+{any_type}|\bconst\s+{any_type}|\b(explicit|implicit)\s+operator\s+{any_type}|{any_type}\s+operator\b))"
);

pattern!(
    /// Keyword followed by its type: `delegate void`, `implicit operator int`.
    symbol_type_then_return_type = r"(?P<symbolType>\s*(delegate|event|const|(explicit|implicit)\s+operator))\s+(?P<returnType>{any_type})"
);

pattern!(
    /// Type followed by keyword: `Money operator`.
    return_type_then_symbol_type = r"(?P<returnType>{any_type})\s+(?P<symbolType>operator)"
);

pattern!(
    /// Constructor name inside a provider detail string.
    constructor_name = r"(?P<name>{name})\("
);

pattern!(
    /// Finalizer name inside a provider detail string.
    finalizer_name = r"~(?P<name>{name})\("
);

pattern!(
    /// Namespace-qualified type name from a provider detail string.
    qualified_type_name = r"^((?P<namespace>({type}\.)*{type})\.)?(?P<name>{type})$"
);

pattern!(
    /// Leading type of one implemented/extended contract entry.
    implemented_type = r"^\s*(?P<type>{any_type})"
);

pattern!(
    /// Start of a generic constraint clause in a type signature.
    where_clause = r"\bwhere\b"
);

// ============================================================================
// DOCUMENT-LEVEL DECLARATIONS
// ============================================================================

pattern!(
    /// `using` directive, including `global`, `static` and alias forms.
    using_directive = r"(?m)^(?P<directive>[ \t]*(?P<global>global\s+)?using\s+(?P<static>static\s+)?((?P<alias>{name})\s*=\s*)?(?P<namespace>{namespace})\s*;[\r\n]*)"
);

pattern!(
    /// Terminator-bodied namespace declaration: `namespace A.B;`.
    file_scoped_namespace = r"(?m)^(?P<declaration>(?P<signature>[ \t]*namespace\s+(?P<namespace>{namespace}))\s*;)"
);

pattern!(
    /// Brace-bodied namespace declaration through its closing brace.
    ///
    /// Only meaningful on text where member bodies have been blanked out.
    bodied_namespace = r"(?ms)^(?P<declaration>(?P<signature>[ \t]*namespace\s+(?P<namespace>{namespace}))\s*\{.*?\})"
);

// ============================================================================
// TRIVIA
// ============================================================================

pattern!(
    /// `/* ... */` comment.
    multi_line_comment = r"(?s)(?P<text>/\*.*?\*/)"
);

pattern!(
    /// Consecutive `///` documentation comment lines.
    xml_comment = r"(?m)^(?P<text>([ \t]*///.*?[\r\n]*)+)$"
);

pattern!(
    /// `//` comment line.
    single_line_comment = r"(?m)^(?P<text>[ \t]*//.*?[\r\n]*)$"
);

pattern!(
    /// `#if` or `#pragma` directive line.
    open_directive = r"(?m)^(?P<text>[ \t]*#[ \t]*(if|pragma)\b.*?)\r?\n"
);

pattern!(
    /// `#endif` or `#pragma` directive line.
    close_directive = r"(?m)^(?P<text>[ \t]*#[ \t]*(endif|pragma)\b.*?)\r?\n"
);

pattern!(
    /// Marker comment of generated files.
    auto_generated = r"(?m)^[ \t]*/{2,3}[^\r\n]*<auto-generated\b"
);

pattern!(
    /// Framework type names with a keyword equivalent.
    framework_types = FRAMEWORK_TYPES
);

// ============================================================================
// CAPABILITY MEMBERS
// ============================================================================

pattern!(
    /// Boolean backing field of a disposal implementation.
    disposed_field = r"(?i)^_?(is)?disposed$"
);

pattern!(
    dispose_method = r"^((.*?\.)?I(Async)?Disposable\.)?Dispose(Async)?$"
);

pattern!(
    collection_property =
        r"^((.*?\.)?ICollection(<.*?>)?\.)?(Count|IsReadOnly|IsSynchronized|SyncRoot)$"
);

pattern!(
    collection_method = r"^((.*?\.)?ICollection(<.*?>)?\.)?(Add|Clear|Contains|CopyTo|Remove)$"
);

pattern!(
    convertible_method = r"^((.*?\.)?IConvertible\.)?(GetTypeCode|To(Boolean|Byte|Char|DateTime|Decimal|Double|Int16|Int32|Int64|SByte|Single|String|Type|UInt16|UInt32|UInt64))$"
);

pattern!(
    list_property = r"^((.*?\.)?IList(<.*?>)?\.)?(IsFixedSize|IsReadOnly)$"
);

pattern!(
    list_method =
        r"^((.*?\.)?IList(<.*?>)?\.)?(Add|Clear|Contains|IndexOf|Insert|Remove|RemoveAt)$"
);

pattern!(
    clone_method = r"^((.*?\.)?ICloneable\.)?Clone$"
);

pattern!(
    compare_method = r"^((.*?\.)?IComparable(<.*?>)?\.)?CompareTo$"
);

pattern!(
    enumerator_method = r"^((.*?\.)?IEnumerable(<.*?>)?\.)?GetEnumerator$"
);

pattern!(
    equality_comparer_method = r"^((.*?\.)?IEqualityComparer(<.*?>)?\.)?(Equals|GetHashCode)$"
);

pattern!(
    equatable_method = r"^((.*?\.)?IEquatable(<.*?>)?\.)?Equals$"
);

pattern!(
    formattable_method = r"^((.*?\.)?IFormattable\.)?ToString$"
);

// ============================================================================
// RENAMING
// ============================================================================

pattern!(
    /// `{name}`, `{name:2-5}`, `{name:0:lower}` and `{name:1:upper}` placeholders.
    name_placeholder = r"\{name(:(?P<indexes>[^:}]+))?(:(?P<func>[^:}]+))?\}"
);

/// Pattern that finds a symbol name, optionally qualified by a type prefix.
pub fn symbol_name(name: &str) -> Regex {
    let escaped = regex::escape(name);
    let leading = if name.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    let trailing = if name.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    compile(&format!(r"{leading}({{type}}\.)?{escaped}{trailing}"))
}
