//! One-time identifier assignment for the work record.

use elms_core::{CoreError, FieldPath, Value};
use elms_schema::SchemaNode;

use crate::render::ID_FIELD;

/// Section whose first render assigns [`ID_FIELD`].
pub const WORK_SECTION: &str = "workInformation";

/// Return `data` with an identifier written at `field`, or `None` if the
/// field already holds a non-empty value.
///
/// The identifier shape follows the field's declared type in `node`: a
/// numeric id for `integer`, a GUID otherwise (including when the schema does
/// not declare the field at all).
///
/// # Errors
///
/// Returns `CoreError::Entropy` if no random bytes are available.
pub fn ensure_identifier(
    data: &Value,
    node: &SchemaNode,
    field: &str,
) -> Result<Option<Value>, CoreError> {
    let path = FieldPath::key(field);
    if data.get(&path).is_some_and(Value::is_truthy) {
        return Ok(None);
    }

    let strategy = node
        .property(field)
        .map_or(elms_core::IdStrategy::Guid, SchemaNode::id_strategy);
    let id = strategy.generate()?;
    tracing::info!(field, strategy = strategy.as_str(), id = %id, "generated identifier");
    Ok(Some(data.with(&path, id)))
}

/// [`ensure_identifier`] for the work section's `workId`.
///
/// # Errors
///
/// Returns `CoreError::Entropy` if no random bytes are available.
pub fn ensure_work_id(data: &Value, work_section: &SchemaNode) -> Result<Option<Value>, CoreError> {
    ensure_identifier(data, work_section, ID_FIELD)
}
