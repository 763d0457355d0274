//! # sharpen-base
//!
//! Core library for reconstructing C# symbol trees from a language-service
//! outline, reorganizing them by policy, and renaming symbols by rule.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Collaborator traits, sharpen and batch workflows
//!   ↓
//! config    → Settings, workspace overrides, file filters
//!   ↓
//! organize  → Ordering, regionalization, capability regions
//! matching  → Symbol matchers and rename rules
//!   ↓
//! symbols   → Symbol tree, Builder, text rendering
//!   ↓
//! syntax    → Symbol kinds, access modifiers, Pattern Library
//!   ↓
//! core      → SharpenError, text helpers
//! base      → Primitives (TextRange, LineIndex, Position/Span)
//! ```

// ============================================================================
// MODULES (dependency order: base → core → syntax → symbols → organize/matching → config → ide)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Position/Span
pub mod base;

/// Error type and text helpers
pub mod core;

/// Symbol kinds and the Pattern Library
pub mod syntax;

/// Symbol tree reconstruction and serialization
pub mod symbols;

/// Policy-driven reordering and regionalization
pub mod organize;

/// Symbol matching and rename rules
pub mod matching;

/// Settings and file filters
pub mod config;

/// Host collaborators and document workflows
pub mod ide;

// Re-export commonly needed items
pub use config::SharpenSettings;
pub use core::{Result, SharpenError};
pub use organize::Organizer;
pub use symbols::{OutlineEntry, OutlineKind, Symbol, TextRenderer, build};
pub use syntax::{AccessModifier, MemberModifiers, SymbolType};

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};
