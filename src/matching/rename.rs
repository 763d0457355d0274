//! Rename rules: a matcher plus a replacement template.
//!
//! This module only decides what to rename and to what. Applying the rename
//! and updating references belongs to the rename provider collaborator.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::base::Span;
use crate::core::text_utils::is_identifier;
use crate::core::Result;
use crate::symbols::{Symbol, SymbolId};
use crate::syntax::patterns;

use super::matcher::{SymbolMatcher, SymbolMatcherPattern};

/// A rename rule as written in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SymbolRename {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub disabled: bool,
    /// Template with `{name}`, `{name:i-j}` and `{name:...:lower|upper}` placeholders.
    pub replacement: String,
    #[serde(flatten)]
    pub pattern: SymbolMatcherPattern,
}

/// A compiled [`SymbolRename`].
#[derive(Debug, Clone)]
pub struct RenameRule {
    rule: SymbolRename,
    matcher: SymbolMatcher,
}

impl RenameRule {
    pub fn new(rule: SymbolRename) -> Result<Self> {
        let matcher = SymbolMatcher::new(&rule.pattern)?;
        Ok(Self { rule, matcher })
    }

    /// Compile the enabled rules, in order.
    pub fn compile_enabled(rules: &[SymbolRename]) -> Result<Vec<Self>> {
        rules
            .iter()
            .filter(|r| !r.disabled)
            .cloned()
            .map(Self::new)
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.rule.name
    }

    pub fn is_disabled(&self) -> bool {
        self.rule.disabled
    }

    /// New name for the symbol, or `None` when the rule does not match, is
    /// disabled, or would leave the name unchanged.
    pub fn process(&self, symbol: &Symbol) -> Option<String> {
        if self.rule.disabled {
            return None;
        }

        let matched = self.matcher.find(symbol)?.name?;
        let new_name = expand_template(&self.rule.replacement, &matched);
        (new_name != symbol.name.as_str()).then_some(new_name)
    }
}

/// Substitute name placeholders in a replacement template.
///
/// `{name:i-j}` takes characters `i..j` of the captured name, `{name:i}` the
/// characters from `i`; a `lower` or `upper` after the range changes case.
/// A segment that is not an index range leaves the name whole.
pub fn expand_template(template: &str, name: &str) -> String {
    patterns::name_placeholder()
        .replace_all(template, |captures: &regex::Captures<'_>| {
            let indexes = captures.name("indexes").map(|m| m.as_str());
            let func = captures.name("func").map(|m| m.as_str());

            let mut value = match indexes.and_then(parse_range) {
                Some((start, end)) => substring(name, start, end),
                None => name.to_string(),
            };
            match func.map(str::to_lowercase).as_deref() {
                Some("lower") => value = value.to_lowercase(),
                Some("upper") => value = value.to_uppercase(),
                _ => {}
            }
            value
        })
        .into_owned()
}

fn parse_range(indexes: &str) -> Option<(usize, Option<usize>)> {
    let mut parts = indexes.split('-');
    let start = parts.next()?.trim().parse().ok()?;
    let end = match parts.next() {
        Some(end) => Some(end.trim().parse().ok()?),
        None => None,
    };
    Some((start, end))
}

fn substring(text: &str, start: usize, end: Option<usize>) -> String {
    let len = text.chars().count();
    let end = end.unwrap_or(len).min(len);
    let start = start.min(end);
    text.chars().skip(start).take(end - start).collect()
}

// ============================================================================
// CANDIDATE SEARCH
// ============================================================================

/// A rename the workflow should request from the rename provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCandidate {
    pub rule: String,
    pub symbol: SymbolId,
    /// Parent-qualified name; survives a rebuild, unlike `symbol`.
    pub key: String,
    /// Where the provider should be asked to rename.
    pub selection: Option<Span>,
    pub old_name: String,
    pub new_name: String,
    /// Name as written in the declaration, for reporting.
    pub member_name: String,
}

/// Parent name plus qualified name.
pub fn candidate_key(symbol: &Symbol) -> String {
    match &symbol.parent {
        Some(parent) => format!("{}/{}", parent.name, symbol.qualified_name()),
        None => symbol.qualified_name(),
    }
}

/// Whether a sibling other than `symbol` already has `new_name`.
pub fn collides_with_sibling(symbol: &Symbol, new_name: &str, siblings: &[Symbol]) -> bool {
    siblings
        .iter()
        .any(|s| s.id != symbol.id && s.name.as_str() == new_name)
}

/// First rename to attempt, searching rules in order and each symbol list
/// depth-first with every rule.
///
/// Candidates whose [`candidate_key`] is in `skip` are passed over, as are names
/// that would collide with a sibling or are not valid identifiers.
pub fn find_candidate(
    rules: &[RenameRule],
    symbols: &[Symbol],
    skip: &FxHashSet<String>,
) -> Option<RenameCandidate> {
    for rule in rules {
        for symbol in symbols {
            if let Some(new_name) = rule.process(symbol)
                && !skip.contains(&candidate_key(symbol))
            {
                if collides_with_sibling(symbol, &new_name, symbols) {
                    tracing::warn!(
                        "[RENAME] {}: '{}' cannot become '{}', a sibling already has that name",
                        rule.name(),
                        symbol.member_name(),
                        new_name
                    );
                } else if !is_identifier(&new_name) {
                    tracing::warn!(
                        "[RENAME] {}: '{}' is not a valid identifier",
                        rule.name(),
                        new_name
                    );
                } else {
                    return Some(RenameCandidate {
                        rule: rule.name().to_string(),
                        symbol: symbol.id,
                        key: candidate_key(symbol),
                        selection: symbol.selection(),
                        old_name: symbol.name.to_string(),
                        new_name,
                        member_name: symbol.member_name().to_string(),
                    });
                }
            }

            if symbol.has_children()
                && let Some(candidate) = find_candidate(rules, &symbol.children, skip)
            {
                return Some(candidate);
            }
        }
    }
    None
}
