//! # elms-form
//!
//! Schema-driven form model for ELMS work records.
//!
//! This crate provides:
//! - [`Renderer`]: turns a schema scope plus a value tree into [`FieldView`]s
//! - [`Edit`]: user edits addressed by field path, resolved per field kind
//! - [`SectionSession`]: one section's tree, transient errors, and listeners
//! - [`Form`]: every open section plus the combined tree, submit and clear
//! - [`ensure_work_id`]: first-render identifier assignment

pub mod autoid;
pub mod edit;
pub mod error;
pub mod form;
pub mod label;
pub mod render;
pub mod session;
pub mod view;

pub use autoid::{WORK_SECTION, ensure_identifier, ensure_work_id};
pub use edit::Edit;
pub use error::FormError;
pub use form::{DEFAULT_SECTIONS, Form, Submission};
pub use label::humanize;
pub use render::{ID_FIELD, RECORD_SCOPE, Renderer, new_item};
pub use session::SectionSession;
pub use view::{Control, FieldView, FormView, InputType, ListItem, SectionView};
