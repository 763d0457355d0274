//! Organize policies: how one nesting level is ordered and regionalized.

use serde::{Deserialize, Serialize};

use crate::syntax::SymbolType;

/// One nested grouping key, applied outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderKey {
    /// Groups ordered by the policy's type precedence.
    Type,
    /// Groups ordered by visibility rank.
    Access,
    /// Groups ordered alphabetically.
    Name,
}

/// A component of a symbol's region label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionKey {
    /// The visibility label, e.g. `private`.
    Access,
    /// The plural type label, e.g. `fields`.
    Type,
}

/// Which policy applies to a symbol list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolLevel {
    /// Members of a file or namespace.
    Namespace,
    /// Members of a type.
    Type,
}

/// Ordering and regionalization rules for one nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizePolicy {
    pub ordering: Vec<OrderKey>,
    pub type_sort: Vec<SymbolType>,
    pub regionalization: Vec<RegionKey>,
    /// Runs of this many symbols or fewer are not wrapped.
    pub region_threshold: usize,
    pub do_not_regionalize_members_of: Vec<SymbolType>,
    pub do_not_regionalize_types: Vec<SymbolType>,
    pub only_regionalize_members_of: Vec<SymbolType>,
    pub only_regionalize_types: Vec<SymbolType>,
}

/// Default region threshold.
pub const DEFAULT_REGION_THRESHOLD: usize = 5;

impl Default for OrganizePolicy {
    fn default() -> Self {
        Self {
            ordering: Vec::new(),
            type_sort: Vec::new(),
            regionalization: Vec::new(),
            region_threshold: DEFAULT_REGION_THRESHOLD,
            do_not_regionalize_members_of: Vec::new(),
            do_not_regionalize_types: Vec::new(),
            only_regionalize_members_of: Vec::new(),
            only_regionalize_types: Vec::new(),
        }
    }
}

impl OrganizePolicy {
    /// Shipped policy for namespace-level symbols.
    pub fn namespace_level() -> Self {
        Self {
            ordering: vec![OrderKey::Type, OrderKey::Access, OrderKey::Name],
            type_sort: vec![
                SymbolType::Delegate,
                SymbolType::Interface,
                SymbolType::Enum,
                SymbolType::Struct,
                SymbolType::RecordStruct,
                SymbolType::Class,
                SymbolType::RecordClass,
            ],
            ..Self::default()
        }
    }

    /// Shipped policy for type members.
    pub fn type_level() -> Self {
        Self {
            ordering: vec![OrderKey::Type, OrderKey::Access, OrderKey::Name],
            type_sort: vec![
                SymbolType::Constant,
                SymbolType::Field,
                SymbolType::StaticConstructor,
                SymbolType::Constructor,
                SymbolType::Finalizer,
                SymbolType::Delegate,
                SymbolType::Event,
                SymbolType::Enum,
                SymbolType::Interface,
                SymbolType::Property,
                SymbolType::Indexer,
                SymbolType::Method,
                SymbolType::Operator,
                SymbolType::Struct,
                SymbolType::RecordStruct,
                SymbolType::Class,
                SymbolType::RecordClass,
            ],
            regionalization: vec![RegionKey::Access, RegionKey::Type],
            do_not_regionalize_members_of: vec![SymbolType::Interface],
            ..Self::default()
        }
    }

    /// A policy that neither reorders nor regionalizes.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Whether grouping and sorting run at all.
    pub fn sorts(&self) -> bool {
        !self.ordering.is_empty() && !self.type_sort.is_empty()
    }

    pub fn regionalizes(&self) -> bool {
        !self.regionalization.is_empty()
    }

    /// Rank of a type in the precedence list; unlisted types rank last.
    pub fn type_rank(&self, symbol_type: SymbolType) -> usize {
        self.type_sort
            .iter()
            .position(|t| *t == symbol_type)
            .unwrap_or(usize::MAX)
    }

    /// Drop `using` and `namespace` from the precedence list; those are
    /// always placed first.
    pub fn normalized(mut self) -> Self {
        strip_directive_types(&mut self.type_sort);
        self
    }

    /// Overlay the non-empty lists of `other`, and its threshold.
    pub fn overlay(&mut self, other: &OrganizePolicy) {
        fn take<T: Clone>(target: &mut Vec<T>, source: &[T]) {
            if !source.is_empty() {
                *target = source.to_vec();
            }
        }

        take(&mut self.ordering, &other.ordering);
        take(&mut self.type_sort, &other.type_sort);
        take(&mut self.regionalization, &other.regionalization);
        take(&mut self.do_not_regionalize_members_of, &other.do_not_regionalize_members_of);
        take(&mut self.do_not_regionalize_types, &other.do_not_regionalize_types);
        take(&mut self.only_regionalize_members_of, &other.only_regionalize_members_of);
        take(&mut self.only_regionalize_types, &other.only_regionalize_types);
        self.region_threshold = other.region_threshold;
        strip_directive_types(&mut self.type_sort);
    }

    /// Whether a symbol of `symbol_type` under `parent` takes part in
    /// generic regionalization.
    pub fn is_regionalizable(&self, symbol_type: SymbolType, parent: Option<SymbolType>) -> bool {
        if self.do_not_regionalize_types.contains(&symbol_type) {
            return false;
        }
        if let Some(parent) = parent
            && self.do_not_regionalize_members_of.contains(&parent)
        {
            return false;
        }
        if !self.only_regionalize_types.is_empty() && !self.only_regionalize_types.contains(&symbol_type) {
            return false;
        }
        if let Some(parent) = parent
            && !self.only_regionalize_members_of.is_empty()
            && !self.only_regionalize_members_of.contains(&parent)
        {
            return false;
        }
        true
    }
}

fn strip_directive_types(types: &mut Vec<SymbolType>) {
    types.retain(|t| !matches!(t, SymbolType::Using | SymbolType::Namespace));
}
