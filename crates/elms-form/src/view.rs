//! Rendered form description.
//!
//! A view is a plain data tree describing which controls to show, with what
//! values and chrome. It carries no behaviour; edits come back in as
//! [`Edit`](crate::edit::Edit)s addressed by the same paths.

use elms_core::{FieldPath, Value};
use serde::Serialize;

/// Label of the neutral option every select starts with.
pub const UNSELECTED_LABEL: &str = "Select an option";

/// Placeholder shown in URL inputs.
pub const URL_PLACEHOLDER: &str = "https://example.com";

/// Note attached to the generated identifier field.
pub const GENERATED_ID_NOTE: &str = "This ID is automatically generated and cannot be changed";

/// One rendered field with its chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    /// Element id, `<scope>-<path>`.
    pub id: String,
    pub name: String,
    pub path: FieldPath,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Transient per-field error, cleared when the field is edited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub control: Control,
}

/// Flavour of a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Url,
    Date,
}

/// The control a field renders as.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// Single choice over `options`, preceded by an unselected option.
    Select {
        placeholder: String,
        options: Vec<String>,
        selected: String,
    },
    Input {
        input: InputType,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Number {
        value: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Toggle { checked: bool },
    /// Existing elements plus the value an "add" action appends.
    List {
        items: Vec<ListItem>,
        add_default: Value,
    },
    /// Nested record. `level` is 0 for fields directly in the render scope.
    Group { level: usize, fields: Vec<FieldView> },
}

/// One element of a list control. `editor` is `None` when the element's
/// schema renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub index: usize,
    pub editor: Option<FieldView>,
}

/// A rendered top-level section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub key: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
}

/// Every open section of a form, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<SectionView>,
}

impl FieldView {
    /// Depth-first search for the field at `path`, descending into groups and
    /// list elements.
    #[must_use]
    pub fn find(&self, path: &FieldPath) -> Option<&Self> {
        if &self.path == path {
            return Some(self);
        }
        match &self.control {
            Control::Group { fields, .. } => fields.iter().find_map(|field| field.find(path)),
            Control::List { items, .. } => items
                .iter()
                .filter_map(|item| item.editor.as_ref())
                .find_map(|editor| editor.find(path)),
            _ => None,
        }
    }
}

impl SectionView {
    /// Field at `path` relative to the section.
    #[must_use]
    pub fn find(&self, path: &FieldPath) -> Option<&FieldView> {
        self.fields.iter().find_map(|field| field.find(path))
    }
}
