//! Form session error types.

use elms_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    /// The schema root has no section with this key.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// The field is generated and cannot be edited.
    #[error("Field '{0}' is generated automatically and cannot be changed")]
    ReadOnly(String),

    /// The edit addresses a path the schema does not describe.
    #[error("Field '{0}' is not described by the schema")]
    UnknownField(String),

    /// The edit does not fit the field's kind (e.g. a toggle on a text field).
    #[error("Field '{path}' is a {kind} field and cannot take a {edit} edit")]
    KindMismatch {
        path: String,
        kind: &'static str,
        edit: &'static str,
    },

    /// A select received a value outside its choices.
    #[error("'{value}' is not one of the choices for '{path}'")]
    InvalidChoice { path: String, value: String },

    /// Raw input text could not be read for the field's kind.
    #[error("Invalid input for '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
