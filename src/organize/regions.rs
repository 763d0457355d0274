//! Generic regionalization of an ordered symbol list.
//!
//! Consecutive eligible symbols sharing a region key are wrapped in one
//! region when the run is longer than the policy threshold. Members already
//! claimed by a capability region group are set aside during the sweep and
//! appended after it, group by group.

use rustc_hash::FxHashSet;

use crate::symbols::{RegionGroup, Symbol, SymbolId};
use crate::syntax::SymbolType;

use super::policy::{OrganizePolicy, RegionKey};

/// Region label for a symbol under `keys`, e.g. `private fields`.
pub fn region_key(symbol: &Symbol, keys: &[RegionKey]) -> String {
    let mut parts = Vec::with_capacity(2);
    if keys.contains(&RegionKey::Access) {
        parts.push(symbol.access.label());
    }
    if keys.contains(&RegionKey::Type) {
        parts.push(symbol.symbol_type.plural_label());
    }
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// An open region: where it started and how many symbols it holds.
struct OpenRegion {
    key: String,
    opened: usize,
    last: usize,
    count: usize,
}

/// Wrap runs of `symbols` in regions, then move the members of `groups` to
/// the end of the list. Returns the number of regions kept.
pub fn regionalize(policy: &OrganizePolicy, symbols: &mut Vec<Symbol>, groups: &[RegionGroup]) -> usize {
    let grouped: FxHashSet<SymbolId> = groups.iter().flat_map(|g| g.symbols.iter().copied()).collect();
    let mut set_aside = Vec::new();
    if !grouped.is_empty() {
        let (members, rest): (Vec<Symbol>, Vec<Symbol>) =
            std::mem::take(symbols).into_iter().partition(|s| grouped.contains(&s.id));
        *symbols = rest;
        set_aside = members;
    }

    let kept = if policy.regionalizes() {
        sweep(policy, symbols)
    } else {
        0
    };

    for group in groups {
        for id in &group.symbols {
            if let Some(position) = set_aside.iter().position(|s| s.id == *id) {
                symbols.push(set_aside.remove(position));
            }
        }
    }
    kept
}

fn sweep(policy: &OrganizePolicy, symbols: &mut [Symbol]) -> usize {
    let mut open: Option<OpenRegion> = None;
    let mut kept = 0;

    for index in 0..symbols.len() {
        let symbol = &symbols[index];
        if matches!(symbol.symbol_type, SymbolType::Using | SymbolType::Namespace) {
            continue;
        }
        let parent = symbol.parent.as_ref().map(|p| p.symbol_type);
        if !policy.is_regionalizable(symbol.symbol_type, parent) {
            continue;
        }

        let key = region_key(symbol, &policy.regionalization);
        match &mut open {
            Some(region) if region.key == key => {
                region.last = index;
                region.count += 1;
            }
            _ => {
                if let Some(region) = open.take() {
                    kept += close(policy, symbols, region);
                }
                open = Some(OpenRegion {
                    key,
                    opened: index,
                    last: index,
                    count: 1,
                });
            }
        }
    }

    if let Some(region) = open {
        kept += close(policy, symbols, region);
    }
    kept
}

/// Keep a region longer than the threshold; otherwise leave no markers.
fn close(policy: &OrganizePolicy, symbols: &mut [Symbol], region: OpenRegion) -> usize {
    if region.count <= policy.region_threshold {
        return 0;
    }

    tracing::trace!("[ORGANIZE] region '{}' wraps {} symbols", region.key, region.count);
    symbols[region.opened].regions.start = Some(region.key);
    symbols[region.last].regions.end = Some(String::new());
    1
}
