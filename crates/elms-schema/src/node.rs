//! Schema nodes and the closed set of field kinds they classify into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use elms_core::path::{FieldPath, parse_index};
use elms_core::IdStrategy;

/// Description of one field or container in the schema document.
///
/// Only the subset of JSON-Schema attributes the form engine reads is
/// modelled. Unknown attributes are ignored on load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Closed set of allowed string values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default, skip_serializing_if = "Required::is_empty")]
    pub required: Required,
}

/// The `required` attribute.
///
/// Usually a list of child names. A bare `true` on a field's own node is also
/// accepted and marks that field itself as required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    Names(Vec<String>),
    Flag(bool),
}

impl Default for Required {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

impl Required {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Names(names) => names.is_empty(),
            Self::Flag(flag) => !flag,
        }
    }

    /// Child names listed as required. Empty for the flag form.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::Names(names) => names,
            Self::Flag(_) => &[],
        }
    }
}

/// What kind of control a node renders as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind<'a> {
    /// String restricted to `choices`.
    Choice(&'a [String]),
    /// String holding a URL.
    Url,
    /// String holding a calendar date.
    Date,
    /// Free text.
    Text,
    Integer {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Boolean,
    /// Ordered list whose elements follow `items`.
    Array(Option<&'a SchemaNode>),
    /// Nested record. `None` when the node declares no properties.
    Object(Option<&'a IndexMap<String, SchemaNode>>),
    /// Any `type` the engine does not know, including a missing one.
    Unsupported(&'a str),
}

impl FieldKind<'_> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Choice(_) => "choice",
            Self::Url => "url",
            Self::Date => "date",
            Self::Text => "text",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Unsupported(_) => "unsupported",
        }
    }

    /// Whether values of this kind are stored as strings.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Choice(_) | Self::Url | Self::Date | Self::Text)
    }
}

impl SchemaNode {
    /// Classify this node.
    #[must_use]
    pub fn kind(&self) -> FieldKind<'_> {
        match self.type_name.as_deref() {
            Some("string") => {
                if let Some(choices) = &self.choices {
                    return FieldKind::Choice(choices);
                }
                match self.format.as_deref() {
                    Some("uri" | "url") => FieldKind::Url,
                    Some("date") => FieldKind::Date,
                    _ => FieldKind::Text,
                }
            }
            Some("integer") => FieldKind::Integer {
                minimum: self.minimum,
                maximum: self.maximum,
            },
            Some("boolean") => FieldKind::Boolean,
            Some("array") => FieldKind::Array(self.items.as_deref()),
            Some("object") => FieldKind::Object(self.properties.as_ref()),
            other => FieldKind::Unsupported(other.unwrap_or("")),
        }
    }

    /// Child node for a named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }

    /// Whether `name` is listed in this node's `required` array.
    #[must_use]
    pub fn requires(&self, name: &str) -> bool {
        self.required.names().iter().any(|n| n == name)
    }

    /// Whether this node carries `"required": true` for itself.
    #[must_use]
    pub const fn is_self_required(&self) -> bool {
        matches!(self.required, Required::Flag(true))
    }

    /// Walk from this node to the node describing `path`.
    ///
    /// Named segments descend into `properties`; index segments descend into
    /// an array's `items`.
    #[must_use]
    pub fn resolve(&self, path: &FieldPath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match node.kind() {
                FieldKind::Array(items) => parse_index(segment).and(items),
                _ => node.property(segment),
            })
    }

    /// Identifier shape implied by this node's declared type.
    #[must_use]
    pub fn id_strategy(&self) -> IdStrategy {
        if self.type_name.as_deref() == Some("integer") {
            IdStrategy::Numeric
        } else {
            IdStrategy::Guid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(raw: serde_json::Value) -> SchemaNode {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn classifies_string_variants() {
        assert!(matches!(
            node(json!({"type": "string", "enum": ["a", "b"]})).kind(),
            FieldKind::Choice(choices) if choices.len() == 2
        ));
        assert_eq!(node(json!({"type": "string", "format": "uri"})).kind(), FieldKind::Url);
        assert_eq!(node(json!({"type": "string", "format": "date"})).kind(), FieldKind::Date);
        assert_eq!(node(json!({"type": "string", "format": "email"})).kind(), FieldKind::Text);
    }

    #[test]
    fn enum_wins_over_format() {
        let n = node(json!({"type": "string", "format": "uri", "enum": ["https://a.example"]}));
        assert!(matches!(n.kind(), FieldKind::Choice(_)));
    }

    #[test]
    fn integer_carries_bounds() {
        let n = node(json!({"type": "integer", "minimum": 1950, "maximum": 2100}));
        assert_eq!(
            n.kind(),
            FieldKind::Integer {
                minimum: Some(1950.0),
                maximum: Some(2100.0)
            }
        );
    }

    #[test]
    fn unknown_and_missing_types_are_unsupported() {
        assert_eq!(node(json!({"type": "number"})).kind(), FieldKind::Unsupported("number"));
        assert_eq!(node(json!({})).kind(), FieldKind::Unsupported(""));
    }

    #[test]
    fn object_without_properties_has_none() {
        assert_eq!(node(json!({"type": "object"})).kind(), FieldKind::Object(None));
    }

    #[test]
    fn required_accepts_list_and_flag() {
        let list = node(json!({"type": "object", "required": ["a"]}));
        assert!(list.requires("a"));
        assert!(!list.requires("b"));
        assert!(!list.is_self_required());

        let flag = node(json!({"type": "string", "required": true}));
        assert!(flag.is_self_required());
        assert!(!flag.requires("anything"));
    }

    #[test]
    fn resolve_descends_through_arrays() {
        let root = node(json!({
            "type": "object",
            "properties": {
                "entityInformation": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"role": {"type": "string", "enum": ["Author"]}}
                    }
                }
            }
        }));
        let path: FieldPath = "entityInformation.0.role".parse().unwrap();
        assert!(matches!(root.resolve(&path).unwrap().kind(), FieldKind::Choice(_)));

        let bad: FieldPath = "entityInformation.role".parse().unwrap();
        assert!(root.resolve(&bad).is_none());
    }

    #[test]
    fn id_strategy_follows_declared_type() {
        assert_eq!(node(json!({"type": "integer"})).id_strategy(), IdStrategy::Numeric);
        assert_eq!(node(json!({"type": "string"})).id_strategy(), IdStrategy::Guid);
    }
}
