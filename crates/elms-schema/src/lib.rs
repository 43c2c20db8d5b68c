//! # elms-schema
//!
//! Schema model for ELMS forms.
//!
//! This crate provides:
//! - [`SchemaNode`]: the subset of JSON-Schema attributes the form engine reads
//! - [`FieldKind`]: the closed set of control kinds a node classifies into
//! - [`SchemaDocument`]: loading (file, text, or the bundled ELMS 3.0 subset),
//!   section lookup, and an optional JSON-Schema conformance check
//!
//! The schema is an external, read-only input. Nothing here mutates it after
//! load.

pub mod document;
pub mod error;
pub mod node;

pub use document::{BUNDLED_SCHEMA, SchemaDocument};
pub use error::SchemaError;
pub use node::{FieldKind, Required, SchemaNode};
