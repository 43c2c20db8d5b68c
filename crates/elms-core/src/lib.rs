//! # elms-core
//!
//! Value tree, path addressing, and identifier generation shared by every ELMS
//! crate.
//!
//! This crate provides:
//! - [`Value`]: the typed, reference-counted tree holding one session's data
//! - [`FieldPath`]: dot-separated addressing with get/set over the tree
//! - [`coerce`]: per-kind readers that fall back to a safe default
//! - [`ids`]: GUID and numeric identifier generation for the work record
//! - [`CoreError`]: errors shared across crates

pub mod coerce;
pub mod errors;
pub mod ids;
pub mod path;
pub mod value;

pub use errors::CoreError;
pub use ids::IdStrategy;
pub use path::FieldPath;
pub use value::{Map, Value, ValueKind};
