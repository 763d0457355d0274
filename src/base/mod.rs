//! Foundation types for the sharpen toolchain.
//!
//! This module provides the text primitives used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Byte offsets into a document
//! - [`LineCol`], [`LineIndex`] - Offset/line conversion
//! - [`Position`], [`Span`] - Line/column positions used by collaborators
//!
//! This module has NO dependencies on other sharpen modules.

mod line_index;
mod position;

pub use line_index::{LineCol, LineIndex};
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
