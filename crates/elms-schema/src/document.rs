//! The schema document: root node, sections, and conformance checking.

use std::path::Path;

use elms_core::Value;

use crate::error::SchemaError;
use crate::node::SchemaNode;

/// ELMS 3.0 subset shipped with the crate, used when no schema file is given.
pub const BUNDLED_SCHEMA: &str = include_str!("../schemas/elms-3.0.json");

/// A loaded, immutable schema document.
///
/// Holds both the typed root node the form engine walks and the raw JSON it
/// was parsed from, which is what the conformance check compiles.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    root: SchemaNode,
    raw: serde_json::Value,
}

impl SchemaDocument {
    /// Parse a document from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` if the value does not fit the node model.
    pub fn from_value(raw: serde_json::Value) -> Result<Self, SchemaError> {
        let root: SchemaNode = serde_json::from_value(raw.clone())?;
        let sections = root.properties.as_ref().map_or(0, indexmap::IndexMap::len);
        tracing::debug!(sections, "schema document loaded");
        Ok(Self { root, raw })
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` on malformed JSON or an unexpected shape.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Read and parse a schema file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Io` if the file cannot be read, or
    /// `SchemaError::Parse` if its contents are not a schema document.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// The bundled ELMS 3.0 subset.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` only if the bundled file is corrupt.
    pub fn bundled() -> Result<Self, SchemaError> {
        Self::from_json_str(BUNDLED_SCHEMA)
    }

    #[must_use]
    pub const fn root(&self) -> &SchemaNode {
        &self.root
    }

    #[must_use]
    pub const fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.root.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.root.description.as_deref()
    }

    /// Node for a top-level section such as `workInformation`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SectionNotFound` if the root has no such property.
    pub fn section(&self, key: &str) -> Result<&SchemaNode, SchemaError> {
        self.root
            .property(key)
            .ok_or_else(|| SchemaError::SectionNotFound(key.to_string()))
    }

    /// Top-level section keys in declaration order.
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.root
            .properties
            .iter()
            .flat_map(|props| props.keys().map(String::as_str))
    }

    /// Check `data` against the raw document as a JSON Schema.
    ///
    /// Returns one message per violation. This is independent of the rule
    /// validator and stricter about types.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if the raw document is not a usable
    /// JSON Schema.
    pub fn conformance(&self, data: &Value) -> Result<Vec<String>, SchemaError> {
        let validator = jsonschema::validator_for(&self.raw)
            .map_err(|e| SchemaError::Compile(format!("{e}")))?;
        let instance = serde_json::Value::from(data);
        Ok(validator
            .iter_errors(&instance)
            .map(|e| format!("{}: {e}", e.instance_path))
            .collect())
    }
}
