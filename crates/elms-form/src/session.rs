//! A single form section and the edits applied to it.

use std::collections::BTreeMap;
use std::fmt;

use elms_core::path::parse_index;
use elms_core::{FieldPath, Value};
use elms_schema::{FieldKind, SchemaDocument, SchemaNode};

use crate::autoid::{WORK_SECTION, ensure_work_id};
use crate::edit::Edit;
use crate::error::FormError;
use crate::label::humanize;
use crate::render::{ID_FIELD, Renderer};
use crate::view::SectionView;

type ChangeListener<'s> = Box<dyn FnMut(&str, &Value) + 's>;

/// Editing state for one top-level section such as `workInformation`.
///
/// Owns the section's value tree. Every accepted edit replaces the tree with
/// an updated copy and notifies listeners synchronously, before the next
/// render.
pub struct SectionSession<'s> {
    key: String,
    node: &'s SchemaNode,
    data: Value,
    errors: BTreeMap<FieldPath, String>,
    listeners: Vec<ChangeListener<'s>>,
}

impl fmt::Debug for SectionSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionSession")
            .field("key", &self.key)
            .field("data", &self.data)
            .field("errors", &self.errors)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<'s> SectionSession<'s> {
    /// Open `key` with `initial` data. Non-mapping initial data starts empty.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SectionNotFound` if the schema has no such section.
    pub fn open(schema: &'s SchemaDocument, key: &str, initial: Value) -> Result<Self, FormError> {
        let node = schema
            .section(key)
            .map_err(|_| FormError::SectionNotFound(key.to_string()))?;
        let data = if initial.as_map().is_some() {
            initial
        } else {
            Value::empty_map()
        };
        Ok(Self {
            key: key.to_string(),
            node,
            data,
            errors: BTreeMap::new(),
            listeners: Vec::new(),
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn node(&self) -> &'s SchemaNode {
        self.node
    }

    /// Current section tree.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Register a callback run after every change with the section key and
    /// the new tree.
    pub fn on_change(&mut self, listener: impl FnMut(&str, &Value) + 's) {
        self.listeners.push(Box::new(listener));
    }

    /// Render the section.
    ///
    /// On the work section this first assigns `workId` if it is missing, and
    /// announces the change like any edit. Later renders leave it alone.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Core` if identifier generation fails.
    pub fn render(&mut self) -> Result<SectionView, FormError> {
        if self.key == WORK_SECTION {
            if let Some(updated) = ensure_work_id(&self.data, self.node)? {
                self.replace(updated);
            }
        }
        Ok(self.view())
    }

    /// Render without side effects.
    #[must_use]
    pub fn view(&self) -> SectionView {
        SectionView {
            key: self.key.clone(),
            title: humanize(&self.key),
            description: self.node.description.clone(),
            fields: Renderer::new(self.node, &self.data, &self.key)
                .with_errors(&self.errors)
                .fields(),
        }
    }

    /// Apply one user edit.
    ///
    /// # Errors
    ///
    /// Rejects edits to the generated identifier (`ReadOnly`), to paths the
    /// section schema does not describe (`UnknownField`), and edits that do
    /// not fit the field (`KindMismatch`, `InvalidChoice`), and edits to list
    /// elements that do not exist yet (`InvalidInput`). A rejected edit leaves
    /// the tree untouched.
    pub fn apply(&mut self, edit: &Edit) -> Result<(), FormError> {
        let path = edit.path();
        if path.leaf() == ID_FIELD {
            return Err(FormError::ReadOnly(path.to_string()));
        }
        let node = self
            .node
            .resolve(path)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        self.check_list_indices(path)?;

        let Some(value) = edit.resolve(node.kind(), self.data.get(path))? else {
            tracing::debug!(section = %self.key, path = %path, "edit changed nothing");
            return Ok(());
        };

        self.errors.remove(path);
        self.replace(self.data.with(path, value));
        Ok(())
    }

    /// Apply raw input text to the field at `path`, interpreted by the
    /// field's kind.
    ///
    /// # Errors
    ///
    /// Same as [`SectionSession::apply`], plus `InvalidInput` for unreadable
    /// text.
    pub fn apply_input(&mut self, path: &FieldPath, raw: &str) -> Result<(), FormError> {
        let node = self
            .node
            .resolve(path)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        let edit = Edit::from_input(node.kind(), path.clone(), raw)?;
        self.apply(&edit)
    }

    /// Show `message` next to the field at `path` until it is next edited.
    pub fn set_error(&mut self, path: FieldPath, message: impl Into<String>) {
        self.errors.insert(path, message.into());
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<FieldPath, String> {
        &self.errors
    }

    /// Every segment that indexes into a list must name an existing element.
    /// New elements come from `Edit::AppendItem`.
    fn check_list_indices(&self, path: &FieldPath) -> Result<(), FormError> {
        let mut node = self.node;
        let mut prefix: Option<FieldPath> = None;
        for segment in path.segments() {
            if let FieldKind::Array(_) = node.kind() {
                let len = prefix
                    .as_ref()
                    .and_then(|list| self.data.get(list))
                    .and_then(Value::as_list)
                    .map_or(0, <[Value]>::len);
                if parse_index(segment).is_none_or(|index| index >= len) {
                    return Err(FormError::InvalidInput {
                        path: path.to_string(),
                        reason: format!("list has no element {segment}"),
                    });
                }
            }
            node = node
                .resolve(&FieldPath::key(segment.as_str()))
                .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
            prefix = Some(match prefix {
                Some(list) => list.child(segment),
                None => FieldPath::key(segment.as_str()),
            });
        }
        Ok(())
    }

    fn replace(&mut self, data: Value) {
        self.data = data;
        for listener in &mut self.listeners {
            listener(&self.key, &self.data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;

    fn schema() -> SchemaDocument {
        SchemaDocument::bundled().unwrap()
    }

    fn path(raw: &str) -> FieldPath {
        raw.parse().unwrap()
    }

    #[test]
    fn unknown_section_is_not_found() {
        let schema = schema();
        assert!(matches!(
            SectionSession::open(&schema, "collectionsOfWorks", Value::empty_map()),
            Err(FormError::SectionNotFound(key)) if key == "collectionsOfWorks"
        ));
    }

    #[test]
    fn edits_update_tree_and_notify() {
        let schema = schema();
        let seen = RefCell::new(Vec::new());
        let mut session =
            SectionSession::open(&schema, "versionInformation", Value::empty_map()).unwrap();
        session.on_change(|key, data| seen.borrow_mut().push((key.to_string(), data.clone())));

        session
            .apply(&Edit::Text {
                path: path("versionTitle"),
                text: "First".into(),
            })
            .unwrap();
        session
            .apply(&Edit::Number {
                path: path("originalPublicationYear"),
                raw: "1997".into(),
            })
            .unwrap();

        let expected = Value::from(json!({"versionTitle": "First", "originalPublicationYear": 1997}));
        assert_eq!(session.data(), &expected);

        drop(session);
        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], ("versionInformation".to_string(), expected));
    }

    #[test]
    fn nested_edit_autovivifies_objects() {
        let schema = schema();
        let mut session =
            SectionSession::open(&schema, "versionInformation", Value::empty_map()).unwrap();
        session
            .apply_input(&path("technicalDetails.emulator.emulatorName"), "Basilisk II")
            .unwrap();
        assert_eq!(
            serde_json::Value::from(session.data()),
            json!({"technicalDetails": {"emulator": {"emulatorName": "Basilisk II"}}})
        );
    }

    #[test]
    fn work_id_is_generated_once_and_read_only() {
        let schema = schema();
        let mut session =
            SectionSession::open(&schema, "workInformation", Value::empty_map()).unwrap();

        let view = session.render().unwrap();
        let id = session.data().get(&path("workId")).cloned().unwrap();
        assert!(matches!(&id, Value::Text(text) if text.len() == 36));
        assert!(view.find(&path("workId")).unwrap().read_only);

        session.render().unwrap();
        assert_eq!(session.data().get(&path("workId")), Some(&id));

        let err = session
            .apply(&Edit::Text {
                path: path("workId"),
                text: "mine".into(),
            })
            .unwrap_err();
        assert!(matches!(err, FormError::ReadOnly(_)));
        assert_eq!(session.data().get(&path("workId")), Some(&id));
    }

    #[test]
    fn other_sections_get_no_identifier() {
        let schema = schema();
        let mut session =
            SectionSession::open(&schema, "accessibilityInformation", Value::empty_map()).unwrap();
        session.render().unwrap();
        assert_eq!(session.data(), &Value::empty_map());
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let schema = schema();
        let mut session =
            SectionSession::open(&schema, "versionInformation", Value::empty_map()).unwrap();
        session.set_error(path("eldLink"), "must be a valid URL");
        session.set_error(path("versionTitle"), "required");
        assert_eq!(
            session.view().find(&path("eldLink")).unwrap().error.as_deref(),
            Some("must be a valid URL")
        );

        session
            .apply_input(&path("eldLink"), "https://directory.eliterature.org")
            .unwrap();
        assert!(!session.errors().contains_key(&path("eldLink")));
        assert!(session.errors().contains_key(&path("versionTitle")));
    }

    #[test]
    fn list_edits_through_session() {
        let schema = schema();
        let mut session =
            SectionSession::open(&schema, "accessibilityInformation", Value::empty_map()).unwrap();
        let warnings = path("contentWarnings");

        session.apply(&Edit::AppendItem { path: warnings.clone() }).unwrap();
        session.apply(&Edit::AppendItem { path: warnings.clone() }).unwrap();
        session.apply_input(&path("contentWarnings.1"), "flashing images").unwrap();
        session
            .apply(&Edit::RemoveItem {
                path: warnings.clone(),
                index: 0,
            })
            .unwrap();

        assert_eq!(
            serde_json::Value::from(session.data()),
            json!({"contentWarnings": ["flashing images"]})
        );
    }

    #[test]
    fn rejected_edits_leave_data_untouched() {
        let schema = schema();
        let initial = Value::from(json!({"hasAltText": true}));
        let mut session =
            SectionSession::open(&schema, "accessibilityInformation", initial.clone()).unwrap();

        assert!(matches!(
            session.apply_input(&path("noSuchField"), "x"),
            Err(FormError::UnknownField(_))
        ));
        assert!(matches!(
            session.apply_input(&path("screenReaderCompatible"), "Mostly"),
            Err(FormError::InvalidChoice { .. })
        ));
        assert_eq!(session.data(), &initial);
    }

    #[test]
    fn missing_list_elements_are_rejected() {
        let schema = schema();
        let mut session =
            SectionSession::open(&schema, "accessibilityInformation", Value::empty_map()).unwrap();

        assert!(matches!(
            session.apply_input(&path("contentWarnings.0"), "x"),
            Err(FormError::InvalidInput { .. })
        ));
        assert_eq!(session.data(), &Value::empty_map());

        session
            .apply(&Edit::AppendItem {
                path: path("contentWarnings"),
            })
            .unwrap();
        session.apply_input(&path("contentWarnings.0"), "x").unwrap();
        assert_eq!(
            serde_json::Value::from(session.data()),
            json!({"contentWarnings": ["x"]})
        );

        assert!(matches!(
            session.apply_input(&path("contentWarnings.1"), "y"),
            Err(FormError::InvalidInput { .. })
        ));
    }

    #[test]
    fn huge_list_index_is_rejected_without_panicking() {
        let schema = schema();
        let initial = Value::from(json!({"contentWarnings": ["a"]}));
        let mut session =
            SectionSession::open(&schema, "accessibilityInformation", initial.clone()).unwrap();

        let huge = path(&format!("contentWarnings.{}", usize::MAX));
        assert!(matches!(
            session.apply_input(&huge, "x"),
            Err(FormError::InvalidInput { .. })
        ));
        assert_eq!(session.data(), &initial);
    }

    #[test]
    fn non_mapping_initial_data_starts_empty() {
        let schema = schema();
        let session =
            SectionSession::open(&schema, "workInformation", Value::text("oops")).unwrap();
        assert_eq!(session.data(), &Value::empty_map());
    }
}
