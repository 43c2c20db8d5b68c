//! Schema loading and lookup error types.

use thiserror::Error;

/// Errors from schema loading, section lookup, and conformance checks.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested section key is not a property of the schema root.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// The schema document is not valid JSON or does not match the node model.
    #[error("Schema parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The schema file could not be read.
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The raw document could not be compiled for conformance checking.
    #[error("Schema compilation error: {0}")]
    Compile(String),
}
