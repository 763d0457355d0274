//! Symbol reorganization.
//!
//! ```text
//! symbols ──▶ order (type / access / name) ──▶ capability regions ──▶ generic regions
//!                                                                        │
//!                        children ◀── recurse with namespace or type policy
//! ```
//!
//! - [`policy`]: per-level ordering and regionalization rules
//! - [`capabilities`]: region groups for well-known contract implementations
//! - [`regions`]: threshold-based wrapping of same-key runs
//! - [`organizer`]: the recursive driver

pub mod capabilities;
mod organizer;
pub mod policy;
pub mod regions;

pub use capabilities::{Capability, does_implement, regionalize_capabilities, regionalize_capability};
pub use organizer::{Organizer, compare_names};
pub use policy::{DEFAULT_REGION_THRESHOLD, OrderKey, OrganizePolicy, RegionKey, SymbolLevel};
pub use regions::{region_key, regionalize};

#[cfg(test)]
mod tests;
