//! Schema-driven renderer.
//!
//! Walks a scope node's `properties` and produces a [`FieldView`] per field,
//! reading current values from the value tree. One renderer serves both a
//! single section (scope = section node, data = section tree) and the whole
//! record (scope = schema root, data = combined tree).

use std::collections::BTreeMap;

use elms_core::coerce;
use elms_core::{FieldPath, Value};
use elms_schema::{FieldKind, SchemaNode};

use crate::label::humanize;
use crate::view::{
    Control, FieldView, GENERATED_ID_NOTE, InputType, ListItem, UNSELECTED_LABEL, URL_PLACEHOLDER,
};

/// Name of the generated identifier field. Read-only wherever it appears.
pub const ID_FIELD: &str = "workId";

/// Element-id prefix used when rendering the whole record.
pub const RECORD_SCOPE: &str = "field";

/// Renders the fields of one scope node against one value tree.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    scope: &'a SchemaNode,
    data: &'a Value,
    id_prefix: &'a str,
    errors: Option<&'a BTreeMap<FieldPath, String>>,
}

impl<'a> Renderer<'a> {
    /// `id_prefix` is the section key, or [`RECORD_SCOPE`] for the whole record.
    #[must_use]
    pub const fn new(scope: &'a SchemaNode, data: &'a Value, id_prefix: &'a str) -> Self {
        Self {
            scope,
            data,
            id_prefix,
            errors: None,
        }
    }

    /// Attach per-field messages to show next to their fields.
    #[must_use]
    pub const fn with_errors(mut self, errors: &'a BTreeMap<FieldPath, String>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Render every property of the scope node in declaration order.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldView> {
        self.scope
            .properties
            .iter()
            .flatten()
            .filter_map(|(key, node)| self.render(key, node, &FieldPath::key(key.as_str()), 0))
            .collect()
    }

    /// Render one field.
    ///
    /// Returns `None` for nodes that render nothing: unsupported types and
    /// objects without properties.
    #[must_use]
    pub fn render(
        &self,
        name: &str,
        node: &SchemaNode,
        path: &FieldPath,
        level: usize,
    ) -> Option<FieldView> {
        let stored = self.data.get(path);
        let control = match node.kind() {
            FieldKind::Choice(choices) => Control::Select {
                placeholder: UNSELECTED_LABEL.to_string(),
                options: choices.to_vec(),
                selected: self.text(path, stored, "choice"),
            },
            FieldKind::Url => Control::Input {
                input: InputType::Url,
                value: self.text(path, stored, "url"),
                placeholder: Some(URL_PLACEHOLDER.to_string()),
            },
            FieldKind::Date => Control::Input {
                input: InputType::Date,
                value: self.text(path, stored, "date"),
                placeholder: None,
            },
            FieldKind::Text => Control::Input {
                input: InputType::Text,
                value: self.text(path, stored, "text"),
                placeholder: None,
            },
            FieldKind::Integer { minimum, maximum } => {
                let read = coerce::integer(stored);
                log_mismatch(path, "integer", read.mismatched, stored);
                Control::Number {
                    value: read.value,
                    min: minimum,
                    max: maximum,
                }
            }
            FieldKind::Boolean => {
                let read = coerce::flag(stored);
                log_mismatch(path, "boolean", read.mismatched, stored);
                Control::Toggle {
                    checked: read.value,
                }
            }
            FieldKind::Array(items) => self.list(path, items, stored, level),
            FieldKind::Object(None) => return None,
            FieldKind::Object(Some(properties)) => Control::Group {
                level,
                fields: properties
                    .iter()
                    .filter_map(|(key, child)| {
                        self.render(key, child, &path.child(key), level + 1)
                    })
                    .collect(),
            },
            FieldKind::Unsupported(type_name) => {
                tracing::warn!(
                    path = %path,
                    type_name,
                    "unsupported schema type, field not rendered"
                );
                return None;
            }
        };

        let read_only = name == ID_FIELD;
        Some(FieldView {
            id: format!("{}-{path}", self.id_prefix),
            name: name.to_string(),
            path: path.clone(),
            label: humanize(name),
            description: node.description.clone(),
            required: self.is_required(name, node, path),
            read_only,
            note: read_only.then(|| GENERATED_ID_NOTE.to_string()),
            error: self.errors.and_then(|errors| errors.get(path)).cloned(),
            control,
        })
    }

    fn list(
        &self,
        path: &FieldPath,
        items: Option<&SchemaNode>,
        stored: Option<&Value>,
        level: usize,
    ) -> Control {
        let read = coerce::items(stored);
        log_mismatch(path, "array", read.mismatched, stored);

        let rendered = read
            .value
            .iter()
            .enumerate()
            .map(|(index, _)| ListItem {
                index,
                editor: items.and_then(|node| {
                    self.render(&format!("item-{index}"), node, &path.index(index), level + 1)
                }),
            })
            .collect();

        Control::List {
            items: rendered,
            add_default: new_item(items),
        }
    }

    fn text(&self, path: &FieldPath, stored: Option<&Value>, expected: &str) -> String {
        let read = coerce::text(stored);
        log_mismatch(path, expected, read.mismatched, stored);
        read.value.to_string()
    }

    /// A field is required when the node that contains it lists its name, or
    /// when its own node carries `"required": true`.
    fn is_required(&self, name: &str, node: &SchemaNode, path: &FieldPath) -> bool {
        let container = match path.parent() {
            Some(parent) => self.scope.resolve(&parent),
            None => Some(self.scope),
        };
        container.is_some_and(|parent| parent.requires(name)) || node.is_self_required()
    }
}

/// Value appended by a list's "add" action: an empty string for string
/// items, an empty mapping for anything else.
#[must_use]
pub fn new_item(items: Option<&SchemaNode>) -> Value {
    if items.is_some_and(|node| node.kind().is_textual()) {
        Value::text("")
    } else {
        Value::empty_map()
    }
}

fn log_mismatch(path: &FieldPath, expected: &str, mismatched: bool, stored: Option<&Value>) {
    if mismatched {
        tracing::debug!(
            path = %path,
            expected,
            found = %stored.map_or(elms_core::ValueKind::Null, elms_core::Value::kind),
            "stored value does not match field type, showing default"
        );
    }
}
