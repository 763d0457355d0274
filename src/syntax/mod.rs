//! C# lexical layer: declaration kinds and the pattern library.
//!
//! Nothing here tokenizes or parses C#; patterns only recognize the
//! fragments the symbol builder needs around provider-reported ranges.

pub mod kinds;
pub mod patterns;

pub use kinds::{AccessModifier, MemberModifiers, SymbolType};
