//! Cross-cutting error types for the ELMS crates.
//!
//! Domain-specific errors (`SchemaError`, `FormError`, `ConfigError`) live in
//! their own crates. The binary converges everything into `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A dot-separated path could not be parsed.
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The operating system could not supply random bytes for an identifier.
    #[error("Identifier generation failed: {0}")]
    Entropy(String),
}
