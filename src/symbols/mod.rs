//! Reconstructed C# symbols.
//!
//! - [`outline`]: entries reported by an external outline provider
//! - [`classify`]: provider kinds and declaration text to precise subtypes
//! - [`builder`]: symbol tree reconstruction from an outline
//! - [`text`]: serialization back to source text

pub mod builder;
pub mod classify;
pub mod outline;
mod symbol;
pub mod text;

pub use builder::{SymbolTreeBuilder, build};
pub use outline::{OutlineEntry, OutlineKind};
pub use symbol::{ParentRef, RegionGroup, RegionLabels, Symbol, SymbolId};
pub use text::TextRenderer;
