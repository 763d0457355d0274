//! Symbol matching by type, visibility, modifiers, name and return type.

use std::fmt;
use std::ops::BitOr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{Result, SharpenError};
use crate::symbols::Symbol;
use crate::syntax::{AccessModifier, MemberModifiers, SymbolType};

use super::framework_types::replace_framework_types;

/// Prefix inverting one comma-delimited allow-list.
pub const INVERT_PREFIX: &str = "!:";

/// Textual form of a matcher, as read from settings.
///
/// List dimensions are comma-delimited; a leading `!:` turns that one list
/// into a deny-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SymbolMatcherPattern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_modifiers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_modifiers: Option<String>,
    /// Must capture a `name` group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type_pattern: Option<String>,
}

/// Which symbol properties took part in a successful match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PropertiesMatched(u8);

impl PropertiesMatched {
    pub const NONE: Self = Self(0);
    pub const SYMBOL_TYPE: Self = Self(1 << 0);
    pub const NAME: Self = Self(1 << 1);
    pub const RETURN_TYPE: Self = Self(1 << 2);
    pub const ACCESS_MODIFIERS: Self = Self(1 << 3);
    pub const MEMBER_MODIFIERS: Self = Self(1 << 4);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PropertiesMatched {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for PropertiesMatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertiesMatched({:#07b})", self.0)
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatch {
    pub properties: PropertiesMatched,
    /// The `name` capture, when a name pattern was given.
    pub name: Option<String>,
}

/// One list dimension: the listed values plus whether membership is required
/// or forbidden.
#[derive(Debug, Clone)]
struct Dimension<T> {
    values: T,
    required: bool,
}

fn split_inversion(list: &str) -> (&str, bool) {
    match list.trim().strip_prefix(INVERT_PREFIX) {
        Some(rest) => (rest, false),
        None => (list, true),
    }
}

/// A compiled [`SymbolMatcherPattern`].
#[derive(Debug, Clone)]
pub struct SymbolMatcher {
    types: Option<Dimension<Vec<SymbolType>>>,
    access_modifiers: Option<Dimension<Vec<AccessModifier>>>,
    member_modifiers: Option<Dimension<MemberModifiers>>,
    name: Option<Regex>,
    return_type: Option<Regex>,
}

impl SymbolMatcher {
    /// Compile a pattern. Fails when a regex is invalid or the name pattern
    /// has no `name` group.
    pub fn new(pattern: &SymbolMatcherPattern) -> Result<Self> {
        let types = pattern.types.as_deref().map(|list| {
            let (list, required) = split_inversion(list);
            Dimension {
                values: SymbolType::from_delimited(list),
                required,
            }
        });
        let access_modifiers = pattern.access_modifiers.as_deref().map(|list| {
            let (list, required) = split_inversion(list);
            Dimension {
                values: AccessModifier::from_delimited(list),
                required,
            }
        });
        let member_modifiers = pattern.member_modifiers.as_deref().map(|list| {
            let (list, required) = split_inversion(list);
            Dimension {
                values: MemberModifiers::from_delimited(list),
                required,
            }
        });

        let name = pattern
            .name_pattern
            .as_deref()
            .map(SharpenError::compile)
            .transpose()?;
        if let Some(regex) = &name
            && !regex.capture_names().flatten().any(|n| n == "name")
        {
            return Err(SharpenError::config(format!(
                "name pattern '{}' does not capture a 'name' group",
                regex.as_str()
            )));
        }
        let return_type = pattern
            .return_type_pattern
            .as_deref()
            .map(SharpenError::compile)
            .transpose()?;

        Ok(Self {
            types: types.filter(|d| !d.values.is_empty()),
            access_modifiers: access_modifiers.filter(|d| !d.values.is_empty()),
            member_modifiers: member_modifiers.filter(|d| !d.values.is_empty()),
            name,
            return_type,
        })
    }

    /// Match one symbol, checking type, visibility, modifiers, return type and
    /// name in that order.
    pub fn find(&self, symbol: &Symbol) -> Option<SymbolMatch> {
        let mut properties = PropertiesMatched::NONE;

        if let Some(types) = &self.types {
            if types.values.contains(&symbol.symbol_type) != types.required {
                return None;
            }
            properties = properties | PropertiesMatched::SYMBOL_TYPE;
        }

        if let Some(access) = &self.access_modifiers {
            if access.values.contains(&symbol.access) != access.required {
                return None;
            }
            properties = properties | PropertiesMatched::ACCESS_MODIFIERS;
        }

        if let Some(modifiers) = &self.member_modifiers {
            if symbol.modifiers.contains(modifiers.values) != modifiers.required {
                return None;
            }
            properties = properties | PropertiesMatched::MEMBER_MODIFIERS;
        }

        if let Some(return_type) = &self.return_type {
            let written = symbol.return_type.as_deref().unwrap_or_default();
            if !return_type.is_match(written) && !return_type.is_match(&replace_framework_types(written)) {
                return None;
            }
            properties = properties | PropertiesMatched::RETURN_TYPE;
        }

        let mut name = None;
        if let Some(pattern) = &self.name {
            let captured = pattern.captures(&symbol.name)?.name("name")?.as_str();
            if captured.is_empty() {
                return None;
            }
            name = Some(captured.to_string());
            properties = properties | PropertiesMatched::NAME;
        }

        Some(SymbolMatch { properties, name })
    }

    /// Whether the symbol matches.
    pub fn is_match(&self, symbol: &Symbol) -> bool {
        self.find(symbol).is_some()
    }

    /// Matching symbols of one list, in order, with their matches.
    pub fn filter<'a>(&self, symbols: &'a [Symbol]) -> Vec<(&'a Symbol, SymbolMatch)> {
        symbols
            .iter()
            .filter_map(|symbol| self.find(symbol).map(|m| (symbol, m)))
            .collect()
    }
}
