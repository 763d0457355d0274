//! Symbol matching and rename planning.
//!
//! - [`SymbolMatcher`] - type/visibility/modifier/name/return-type filters
//! - [`RenameRule`] - matcher plus replacement template
//! - [`CSharpType`] - built-in type keywords and their framework names

mod framework_types;
mod matcher;
mod rename;

pub use framework_types::{CSharpType, replace_framework_types};
pub use matcher::{INVERT_PREFIX, PropertiesMatched, SymbolMatch, SymbolMatcher, SymbolMatcherPattern};
pub use rename::{
    RenameCandidate, RenameRule, SymbolRename, candidate_key, collides_with_sibling, expand_template,
    find_candidate,
};
