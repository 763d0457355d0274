//! Regions for members that implement well-known framework contracts.
//!
//! A class that declares (directly or through a sibling type in the same
//! list) one of the known contracts gets the members that satisfy it gathered
//! into a region group. Disposal, collection, list and conversion members get
//! their own region; the small single-method contracts share `interfaces`.
//!
//! ```text
//! IList ──▶ ICollection ──▶ IEnumerable
//! ```

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::SharpenError;
use crate::matching::CSharpType;
use crate::symbols::{RegionGroup, Symbol, SymbolId};
use crate::syntax::{SymbolType, patterns};

/// Shared region label for single-method contracts.
pub const SHARED_REGION: &str = "interfaces";

/// Wildcard enabling every known capability.
pub const ALL_CAPABILITIES: &str = "*";

/// A well-known contract whose members can be regionalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Capability {
    Disposable,
    AsyncDisposable,
    List,
    Collection,
    Enumerable,
    Cloneable,
    Comparable,
    Convertible,
    Formattable,
    EqualityComparer,
    Equatable,
}

impl Capability {
    /// Capabilities recognized by their plain contract name, in order.
    pub const NON_GENERIC: [Capability; 9] = [
        Capability::Disposable,
        Capability::AsyncDisposable,
        Capability::List,
        Capability::Collection,
        Capability::Enumerable,
        Capability::Cloneable,
        Capability::Comparable,
        Capability::Convertible,
        Capability::Formattable,
    ];

    /// Capabilities recognized by their generic contract name, in order.
    pub const GENERIC: [Capability; 6] = [
        Capability::List,
        Capability::Collection,
        Capability::Enumerable,
        Capability::Comparable,
        Capability::EqualityComparer,
        Capability::Equatable,
    ];

    pub fn contract(&self) -> &'static str {
        match self {
            Capability::Disposable => "IDisposable",
            Capability::AsyncDisposable => "IAsyncDisposable",
            Capability::List => "IList",
            Capability::Collection => "ICollection",
            Capability::Enumerable => "IEnumerable",
            Capability::Cloneable => "ICloneable",
            Capability::Comparable => "IComparable",
            Capability::Convertible => "IConvertible",
            Capability::Formattable => "IFormattable",
            Capability::EqualityComparer => "IEqualityComparer",
            Capability::Equatable => "IEquatable",
        }
    }

    pub fn is_disposal(&self) -> bool {
        matches!(self, Capability::Disposable | Capability::AsyncDisposable)
    }

    pub fn has_non_generic_form(&self) -> bool {
        Self::NON_GENERIC.contains(self)
    }

    pub fn has_generic_form(&self) -> bool {
        Self::GENERIC.contains(self)
    }

    /// Contract this one pulls into its region.
    pub fn implies(&self) -> Option<Capability> {
        match self {
            Capability::List => Some(Capability::Collection),
            Capability::Collection => Some(Capability::Enumerable),
            _ => None,
        }
    }

    /// Region label used when the capability is regionalized on its own.
    fn own_region(&self) -> &'static str {
        match self {
            Capability::Disposable
            | Capability::AsyncDisposable
            | Capability::List
            | Capability::Collection
            | Capability::Convertible => self.contract(),
            _ => SHARED_REGION,
        }
    }

    /// Whether a declared contract name is this capability, in plain or
    /// generic form.
    fn names(&self, declared: &str) -> bool {
        let contract = self.contract();
        if declared == contract {
            return self.has_non_generic_form();
        }
        self.has_generic_form()
            && declared
                .strip_prefix(contract)
                .is_some_and(|rest| rest.starts_with('<') && rest.ends_with('>'))
    }

    /// Expand a settings list: `*` selects every capability, `IList` and
    /// `ICollection` pull in what they imply, and `IAsyncDisposable` is
    /// covered by `IDisposable`. Unknown names are skipped.
    pub fn expand(names: &[String]) -> Vec<Capability> {
        let mut expanded: Vec<Capability> = if names.iter().any(|n| n == ALL_CAPABILITIES) {
            Self::NON_GENERIC.iter().chain(Self::GENERIC.iter()).copied().collect()
        } else {
            let mut listed: Vec<Capability> = names.iter().filter_map(|n| n.parse().ok()).collect();
            let mut implied = Vec::new();
            for capability in &listed {
                let mut next = capability.implies();
                while let Some(capability) = next {
                    implied.push(capability);
                    next = capability.implies();
                }
            }
            listed.extend(implied);
            listed
        };

        let mut seen = FxHashSet::default();
        expanded.retain(|c| seen.insert(*c));
        if expanded.contains(&Capability::Disposable) {
            expanded.retain(|c| *c != Capability::AsyncDisposable);
        }
        expanded
    }
}

impl FromStr for Capability {
    type Err = SharpenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NON_GENERIC
            .iter()
            .chain(Self::GENERIC.iter())
            .find(|c| c.contract() == s.trim())
            .copied()
            .ok_or_else(|| SharpenError::config(format!("unknown capability '{s}'")))
    }
}

impl TryFrom<String> for Capability {
    type Error = SharpenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.contract().to_string()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.contract())
    }
}

// ============================================================================
// IMPLEMENTATION CHECK
// ============================================================================

/// Whether `symbol` implements the capability directly, or through a class or
/// interface in `available` that it names among its contracts.
pub fn does_implement(symbol: &Symbol, capability: Capability, available: &[Symbol]) -> bool {
    let mut visited = FxHashSet::default();
    implements_via(symbol, capability, available, &mut visited)
}

fn implements_via<'a>(
    symbol: &'a Symbol,
    capability: Capability,
    available: &'a [Symbol],
    visited: &mut FxHashSet<&'a str>,
) -> bool {
    if symbol.implements.iter().any(|i| capability.names(i)) {
        return true;
    }
    if !visited.insert(symbol.name.as_str()) {
        return false;
    }

    available.iter().any(|other| {
        matches!(other.symbol_type, SymbolType::Class | SymbolType::Interface)
            && other.id != symbol.id
            && symbol.implements.iter().any(|i| i == other.name.as_str())
            && implements_via(other, capability, available, visited)
    })
}

// ============================================================================
// REGIONALIZATION
// ============================================================================

/// Regionalize every enabled capability implemented by the classes in
/// `symbols`. Returns the number of capability regions touched.
pub fn regionalize_capabilities(symbols: &mut [Symbol], enabled: &[Capability]) -> usize {
    if enabled.is_empty() {
        return 0;
    }

    let targets: Vec<usize> = (0..symbols.len())
        .filter(|&i| {
            let s = &symbols[i];
            s.symbol_type == SymbolType::Class && s.has_children() && !s.implements.is_empty()
        })
        .collect();

    let mut touched = 0;
    for index in targets {
        let implemented: Vec<Capability> = enabled
            .iter()
            .copied()
            .filter(|c| does_implement(&symbols[index], *c, symbols))
            .collect();

        let mut regionalized = Vec::new();
        for capability in implemented {
            if regionalize_capability(&mut symbols[index], capability, &mut regionalized, None) {
                touched += 1;
            }
        }
    }

    if touched > 0 {
        tracing::debug!("[ORGANIZE] regionalized {} capability implementations", touched);
    }
    touched
}

/// Gather the members satisfying one capability into a region group of
/// `class`. Each capability is handled at most once per `regionalized` list,
/// and the disposal contracts count as one.
pub fn regionalize_capability(
    class: &mut Symbol,
    capability: Capability,
    regionalized: &mut Vec<Capability>,
    region: Option<&'static str>,
) -> bool {
    if regionalized.contains(&capability)
        || (capability.is_disposal() && regionalized.iter().any(Capability::is_disposal))
    {
        return false;
    }
    regionalized.push(capability);

    let region = region.unwrap_or_else(|| capability.own_region());
    let mut touched = false;
    if let Some(implied) = capability.implies() {
        touched |= regionalize_capability(class, implied, regionalized, Some(region));
    }

    let members = capability_members(class, capability);
    touched |= add_to_region_group(class, region, members);
    touched
}

/// Members of `class` that structurally satisfy the capability, in child order.
fn capability_members(class: &Symbol, capability: Capability) -> Vec<SymbolId> {
    let children = &class.children;
    let named = |symbol_type: SymbolType, pattern: &Regex| -> Vec<SymbolId> {
        children
            .iter()
            .filter(|c| c.symbol_type == symbol_type && pattern.is_match(&c.name))
            .map(|c| c.id)
            .collect()
    };
    let first = |symbol_type: SymbolType, pattern: &Regex| -> Vec<SymbolId> {
        named(symbol_type, pattern).into_iter().take(1).collect()
    };

    let mut members = match capability {
        Capability::Disposable | Capability::AsyncDisposable => {
            let mut members = Vec::new();
            let fields: Vec<&Symbol> = children
                .iter()
                .filter(|c| {
                    c.symbol_type == SymbolType::Field
                        && patterns::disposed_field().is_match(&c.name)
                        && CSharpType::from_type_name(c.return_type.as_deref()) == CSharpType::Bool
                })
                .collect();
            if let [field] = fields.as_slice() {
                members.push(field.id);
            }
            if let Some(finalizer) = children.iter().find(|c| c.symbol_type == SymbolType::Finalizer) {
                members.push(finalizer.id);
            }
            members.extend(named(SymbolType::Method, patterns::dispose_method()));
            members
        }
        Capability::Collection => {
            let mut members = named(SymbolType::Property, patterns::collection_property());
            members.extend(named(SymbolType::Method, patterns::collection_method()));
            members
        }
        Capability::List => {
            let mut members = named(SymbolType::Property, patterns::list_property());
            members.extend(
                children
                    .iter()
                    .filter(|c| c.symbol_type == SymbolType::Indexer)
                    .map(|c| c.id),
            );
            members.extend(named(SymbolType::Method, patterns::list_method()));
            members
        }
        Capability::Convertible => named(SymbolType::Method, patterns::convertible_method()),
        Capability::Enumerable => named(SymbolType::Method, patterns::enumerator_method()),
        Capability::Comparable => named(SymbolType::Method, patterns::compare_method()),
        Capability::EqualityComparer => named(SymbolType::Method, patterns::equality_comparer_method()),
        Capability::Cloneable => first(SymbolType::Method, patterns::clone_method()),
        Capability::Equatable => first(SymbolType::Method, patterns::equatable_method()),
        Capability::Formattable => first(SymbolType::Method, patterns::formattable_method()),
    };
    members.sort_by_key(|id| children.iter().position(|c| c.id == *id));
    members
}

/// Append members to the named group, skipping members already grouped, and
/// move the group's start/end labels to its new first/last member.
fn add_to_region_group(class: &mut Symbol, region: &str, members: Vec<SymbolId>) -> bool {
    let grouped: FxHashSet<SymbolId> = class
        .region_groups
        .iter()
        .flat_map(|g| g.symbols.iter().copied())
        .collect();
    let mut seen = FxHashSet::default();
    let members: Vec<SymbolId> = members
        .into_iter()
        .filter(|id| !grouped.contains(id) && seen.insert(*id))
        .collect();
    if members.is_empty() {
        return false;
    }

    let position = match class.region_groups.iter().position(|g| g.name == region) {
        Some(position) => position,
        None => {
            class.region_groups.push(RegionGroup::new(region));
            class.region_groups.len() - 1
        }
    };

    let previous = std::mem::take(&mut class.region_groups[position].symbols);
    for id in &previous {
        if let Some(member) = class.child_mut(*id) {
            member.regions.clear();
        }
    }

    let mut symbols = previous;
    symbols.extend(members);
    if let Some(first) = symbols.first().copied()
        && let Some(member) = class.child_mut(first)
    {
        member.regions.start = Some(region.to_string());
    }
    if let Some(last) = symbols.last().copied()
        && let Some(member) = class.child_mut(last)
    {
        member.regions.end = Some(String::new());
    }

    tracing::trace!(
        "[ORGANIZE] region '{}' of '{}' now holds {} members",
        region,
        class.name,
        symbols.len()
    );
    class.region_groups[position].symbols = symbols;
    true
}
