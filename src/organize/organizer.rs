//! Reordering and regionalization of a reconstructed symbol tree.

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::symbols::{RegionGroup, Symbol};
use crate::syntax::SymbolType;

use super::capabilities::{Capability, regionalize_capabilities};
use super::policy::{OrderKey, OrganizePolicy, SymbolLevel};
use super::regions::regionalize;

/// Applies namespace-level and type-level policies to a symbol tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizer {
    namespace_level: OrganizePolicy,
    type_level: OrganizePolicy,
    capabilities: Vec<Capability>,
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new(
            OrganizePolicy::namespace_level(),
            OrganizePolicy::type_level(),
            Capability::expand(&[super::capabilities::ALL_CAPABILITIES.to_string()]),
        )
    }
}

impl Organizer {
    pub fn new(namespace_level: OrganizePolicy, type_level: OrganizePolicy, capabilities: Vec<Capability>) -> Self {
        Self {
            namespace_level: namespace_level.normalized(),
            type_level: type_level.normalized(),
            capabilities,
        }
    }

    /// An organizer that leaves order and regions untouched.
    pub fn unchanged() -> Self {
        Self::new(OrganizePolicy::unchanged(), OrganizePolicy::unchanged(), Vec::new())
    }

    pub fn policy(&self, level: SymbolLevel) -> &OrganizePolicy {
        match level {
            SymbolLevel::Namespace => &self.namespace_level,
            SymbolLevel::Type => &self.type_level,
        }
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Organize file-level symbols and, recursively, all their members.
    pub fn organize(&self, symbols: Vec<Symbol>) -> Vec<Symbol> {
        tracing::debug!("[ORGANIZE] organizing {} file-level symbols", symbols.len());
        self.organize_level(symbols, &[], SymbolLevel::Namespace)
    }

    fn organize_level(&self, symbols: Vec<Symbol>, groups: &[RegionGroup], level: SymbolLevel) -> Vec<Symbol> {
        let policy = self.policy(level);

        let mut result = if policy.sorts() && !symbols.is_empty() {
            let (mut directives, rest): (Vec<Symbol>, Vec<Symbol>) = symbols
                .into_iter()
                .partition(|s| matches!(s.symbol_type, SymbolType::Using | SymbolType::Namespace));
            directives.sort_by(|a, b| {
                directive_rank(a.symbol_type)
                    .cmp(&directive_rank(b.symbol_type))
                    .then_with(|| compare_names(&a.name, &b.name))
            });

            let ordered = order(policy, rest, &policy.ordering);
            directives.extend(
                ordered
                    .into_iter()
                    .filter(|s| s.symbol_type != SymbolType::PrimaryConstructor),
            );
            directives
        } else {
            symbols
        };

        regionalize_capabilities(&mut result, &self.capabilities);
        let regions = regionalize(policy, &mut result, groups);
        if regions > 0 {
            tracing::debug!("[ORGANIZE] {} regions at {:?} level", regions, level);
        }

        for symbol in &mut result {
            if !symbol.has_children() {
                continue;
            }
            let child_level = if symbol.symbol_type == SymbolType::Namespace {
                SymbolLevel::Namespace
            } else {
                SymbolLevel::Type
            };
            let children = std::mem::take(&mut symbol.children);
            symbol.children = self.organize_level(children, &symbol.region_groups, child_level);
        }
        result
    }
}

fn directive_rank(symbol_type: SymbolType) -> u8 {
    match symbol_type {
        SymbolType::Using => 0,
        _ => 1,
    }
}

/// Case-insensitive name order, ties broken ordinally.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Partition by the first key, order the partitions, and recurse into each
/// with the remaining keys.
fn order(policy: &OrganizePolicy, symbols: Vec<Symbol>, keys: &[OrderKey]) -> Vec<Symbol> {
    let Some((key, rest)) = keys.split_first() else {
        return symbols;
    };

    let partitions: Vec<Vec<Symbol>> = match key {
        OrderKey::Type => {
            let mut groups = group_by(symbols, |s| s.symbol_type);
            groups.sort_by_key(|(t, _)| policy.type_rank(*t));
            groups.into_iter().map(|(_, g)| g).collect()
        }
        OrderKey::Access => {
            let mut groups = group_by(symbols, |s| s.access);
            groups.sort_by_key(|(access, _)| *access);
            groups.into_iter().map(|(_, g)| g).collect()
        }
        OrderKey::Name => {
            let mut groups = group_by(symbols, |s| s.name.clone());
            groups.sort_by(|(a, _), (b, _)| compare_names(a, b));
            groups.into_iter().map(|(_, g)| g).collect()
        }
    };

    partitions
        .into_iter()
        .flat_map(|partition| order(policy, partition, rest))
        .collect()
}

/// Group symbols by key, keeping first-occurrence order of keys and
/// document order within each group.
fn group_by<K, F>(symbols: Vec<Symbol>, key: F) -> Vec<(K, Vec<Symbol>)>
where
    K: Hash + Eq,
    F: Fn(&Symbol) -> K,
{
    let mut groups: IndexMap<K, Vec<Symbol>> = IndexMap::new();
    for symbol in symbols {
        groups.entry(key(&symbol)).or_default().push(symbol);
    }
    groups.into_iter().collect()
}
