//! User edits and how each one turns into a new field value.

use elms_core::coerce;
use elms_core::{FieldPath, Value};
use elms_schema::FieldKind;

use crate::error::FormError;
use crate::render::new_item;

/// One user interaction with a rendered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Typed or selected text for a text, URL, date, or select field.
    Text { path: FieldPath, text: String },
    /// Raw text typed into a number input.
    Number { path: FieldPath, raw: String },
    Toggle { path: FieldPath, checked: bool },
    /// "Add" on a list control.
    AppendItem { path: FieldPath },
    /// "Remove" on one element of a list control.
    RemoveItem { path: FieldPath, index: usize },
}

impl Edit {
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        match self {
            Self::Text { path, .. }
            | Self::Number { path, .. }
            | Self::Toggle { path, .. }
            | Self::AppendItem { path }
            | Self::RemoveItem { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Number { .. } => "number",
            Self::Toggle { .. } => "toggle",
            Self::AppendItem { .. } => "append",
            Self::RemoveItem { .. } => "remove",
        }
    }

    /// Build the edit a control of `kind` would emit for raw input text.
    ///
    /// Booleans accept `true/false`, `yes/no`, `on/off` and `1/0`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` for unreadable boolean text, and
    /// `FormError::KindMismatch` for containers, which are not set from text.
    pub fn from_input(kind: FieldKind<'_>, path: FieldPath, raw: &str) -> Result<Self, FormError> {
        match kind {
            FieldKind::Choice(_) | FieldKind::Url | FieldKind::Date | FieldKind::Text => {
                Ok(Self::Text {
                    path,
                    text: raw.to_string(),
                })
            }
            FieldKind::Integer { .. } => Ok(Self::Number {
                path,
                raw: raw.to_string(),
            }),
            FieldKind::Boolean => {
                let checked = match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" | "" => false,
                    other => {
                        return Err(FormError::InvalidInput {
                            path: path.to_string(),
                            reason: format!("'{other}' is not a boolean"),
                        });
                    }
                };
                Ok(Self::Toggle { path, checked })
            }
            FieldKind::Array(_) | FieldKind::Object(_) | FieldKind::Unsupported(_) => {
                Err(FormError::KindMismatch {
                    path: path.to_string(),
                    kind: kind.name(),
                    edit: "text",
                })
            }
        }
    }

    /// New value for the edited field, or `None` when the edit changes
    /// nothing (removing an index that does not exist).
    ///
    /// # Errors
    ///
    /// Returns `FormError::KindMismatch` when the edit does not fit `kind`,
    /// and `FormError::InvalidChoice` for a selection outside the choices.
    pub fn resolve(&self, kind: FieldKind<'_>, current: Option<&Value>) -> Result<Option<Value>, FormError> {
        let value = match (self, kind) {
            (Self::Text { text, .. }, FieldKind::Choice(choices)) => {
                if !text.is_empty() && !choices.iter().any(|choice| choice == text) {
                    return Err(FormError::InvalidChoice {
                        path: self.path().to_string(),
                        value: text.clone(),
                    });
                }
                Value::text(text.as_str())
            }
            (Self::Text { text, .. }, FieldKind::Url | FieldKind::Date | FieldKind::Text) => {
                Value::text(text.as_str())
            }
            (Self::Number { raw, .. }, FieldKind::Integer { .. }) => {
                Value::Integer(coerce::parse_integer_input(raw))
            }
            (Self::Toggle { checked, .. }, FieldKind::Boolean) => Value::Bool(*checked),
            (Self::AppendItem { .. }, FieldKind::Array(items)) => {
                let mut next = coerce::items(current).value.to_vec();
                next.push(new_item(items));
                Value::list(next)
            }
            (Self::RemoveItem { index, .. }, FieldKind::Array(_)) => {
                let existing = coerce::items(current).value;
                if *index >= existing.len() {
                    return Ok(None);
                }
                let next = existing
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| i != index)
                    .map(|(_, item)| item.clone())
                    .collect();
                Value::list(next)
            }
            _ => {
                return Err(FormError::KindMismatch {
                    path: self.path().to_string(),
                    kind: kind.name(),
                    edit: self.name(),
                });
            }
        };
        Ok(Some(value))
    }
}
