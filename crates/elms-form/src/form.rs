//! The whole work record: every open section plus the combined tree.

use indexmap::IndexMap;

use elms_core::{FieldPath, Value};
use elms_schema::SchemaDocument;
use elms_validate::{ValidationResult, Validator, format_errors};

use crate::edit::Edit;
use crate::error::FormError;
use crate::render::{RECORD_SCOPE, Renderer};
use crate::session::SectionSession;
use crate::view::{FieldView, FormView};

/// Sections shown for a single-work submission.
pub const DEFAULT_SECTIONS: &[&str] = &[
    "workInformation",
    "versionInformation",
    "accessibilityInformation",
];

/// Outcome of [`Form::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation passed. Carries the submitted tree.
    Accepted(Value),
    /// Validation failed. Carries the result and its display text.
    Rejected {
        result: ValidationResult,
        message: String,
    },
}

impl Submission {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// A form over one work record.
///
/// Each section is edited through its own [`SectionSession`]. After every
/// section change the section's tree is copied into the combined tree under
/// the section key, which is what validation and export read.
#[derive(Debug)]
pub struct Form<'s> {
    schema: &'s SchemaDocument,
    sections: IndexMap<String, SectionSession<'s>>,
    data: Value,
}

impl<'s> Form<'s> {
    /// Open `section_keys` over `initial`. Each section starts from
    /// `initial[key]`, or empty if that is absent.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SectionNotFound` for a key the schema lacks.
    pub fn open<S: AsRef<str>>(
        schema: &'s SchemaDocument,
        section_keys: &[S],
        initial: Value,
    ) -> Result<Self, FormError> {
        let data = if initial.as_map().is_some() {
            initial
        } else {
            Value::empty_map()
        };
        let mut form = Self {
            schema,
            sections: IndexMap::new(),
            data,
        };
        form.open_sections(section_keys.iter().map(AsRef::<str>::as_ref))?;
        Ok(form)
    }

    fn open_sections<'k>(
        &mut self,
        keys: impl Iterator<Item = &'k str>,
    ) -> Result<(), FormError> {
        for key in keys {
            let initial = self
                .data
                .get(&FieldPath::key(key))
                .cloned()
                .unwrap_or_else(Value::empty_map);
            let session = SectionSession::open(self.schema, key, initial)?;
            self.sections.insert(key.to_string(), session);
        }
        Ok(())
    }

    #[must_use]
    pub const fn schema(&self) -> &'s SchemaDocument {
        self.schema
    }

    /// Combined tree of every section touched so far.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    #[must_use]
    pub fn section(&self, key: &str) -> Option<&SectionSession<'s>> {
        self.sections.get(key)
    }

    pub fn section_mut(&mut self, key: &str) -> Option<&mut SectionSession<'s>> {
        self.sections.get_mut(key)
    }

    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Render every open section, running first-render effects.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Core` if identifier generation fails.
    pub fn render(&mut self) -> Result<FormView, FormError> {
        let mut views = Vec::with_capacity(self.sections.len());
        let keys: Vec<String> = self.sections.keys().cloned().collect();
        for key in keys {
            let Some(session) = self.sections.get_mut(&key) else {
                continue;
            };
            let before = session.data().clone();
            views.push(session.render()?);
            if session.data() != &before {
                let updated = session.data().clone();
                self.sync(&key, updated);
            }
        }
        Ok(FormView {
            title: self.schema.title().map(str::to_string),
            description: self.schema.description().map(str::to_string),
            sections: views,
        })
    }

    /// Render the whole record in one scope, every root property at level 0.
    #[must_use]
    pub fn render_record(&self) -> Vec<FieldView> {
        Renderer::new(self.schema.root(), &self.data, RECORD_SCOPE).fields()
    }

    /// Apply an edit to one section.
    ///
    /// # Errors
    ///
    /// `SectionNotFound` if the section is not open, otherwise whatever
    /// [`SectionSession::apply`] rejects.
    pub fn apply(&mut self, section: &str, edit: &Edit) -> Result<(), FormError> {
        let session = self
            .sections
            .get_mut(section)
            .ok_or_else(|| FormError::SectionNotFound(section.to_string()))?;
        session.apply(edit)?;
        let updated = session.data().clone();
        self.sync(section, updated);
        Ok(())
    }

    /// Apply raw input text at a record-level path such as
    /// `versionInformation.eldLink`. The first segment picks the section.
    ///
    /// # Errors
    ///
    /// `UnknownField` for a bare section key, `SectionNotFound` for a section
    /// that is not open, otherwise whatever the section rejects.
    pub fn apply_input(&mut self, path: &FieldPath, raw: &str) -> Result<(), FormError> {
        let section = FieldPath::key(path.head());
        let inner = path
            .strip_prefix(&section)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        let key = section.leaf();
        let session = self
            .sections
            .get_mut(key)
            .ok_or_else(|| FormError::SectionNotFound(key.to_string()))?;
        session.apply_input(&inner, raw)?;
        let updated = session.data().clone();
        self.sync(key, updated);
        Ok(())
    }

    /// Validate the combined tree without side effects.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        Validator::new(self.schema).validate(&self.data)
    }

    /// Validate the combined tree.
    ///
    /// On failure each error that points into an open section is also shown
    /// on its field until the field is edited.
    pub fn submit(&mut self) -> Submission {
        let result = self.validate();
        for session in self.sections.values_mut() {
            session.clear_errors();
        }
        if result.is_valid {
            tracing::info!("submission accepted");
            return Submission::Accepted(self.data.clone());
        }

        for error in &result.errors {
            let Some(path) = error_path(&error.field) else {
                continue;
            };
            let section = FieldPath::key(path.head());
            let (Some(inner), Some(session)) = (
                path.strip_prefix(&section),
                self.sections.get_mut(section.leaf()),
            ) else {
                continue;
            };
            session.set_error(inner, error.message.clone());
        }

        tracing::warn!(errors = result.errors.len(), "submission rejected");
        let message = format_errors(&result.errors);
        Submission::Rejected { result, message }
    }

    /// Reset to an empty record. Open sections restart empty and lose their
    /// listeners.
    ///
    /// # Errors
    ///
    /// Cannot fail for sections that were already open.
    pub fn clear(&mut self) -> Result<(), FormError> {
        self.data = Value::empty_map();
        let keys: Vec<String> = self.sections.keys().cloned().collect();
        self.sections.clear();
        self.open_sections(keys.iter().map(String::as_str))
    }

    /// Pretty JSON of the combined tree.
    ///
    /// # Errors
    ///
    /// Returns a serialization error only for trees that cannot be encoded.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.data)
    }

    fn sync(&mut self, section: &str, updated: Value) {
        self.data.set(&FieldPath::key(section), updated);
    }
}

/// Turn a report field such as `entityInformation[0].role` into a tree path
/// (`entityInformation.0.role`).
fn error_path(field: &str) -> Option<FieldPath> {
    field.replace('[', ".").replace(']', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> SchemaDocument {
        SchemaDocument::bundled().unwrap()
    }

    fn path(raw: &str) -> FieldPath {
        raw.parse().unwrap()
    }

    #[test]
    fn error_paths_convert_brackets() {
        assert_eq!(
            error_path("entityInformation[0].role"),
            Some(path("entityInformation.0.role"))
        );
        assert_eq!(error_path("workInformation"), Some(path("workInformation")));
    }

    #[test]
    fn sections_start_from_initial_slices() {
        let schema = schema();
        let form = Form::open(
            &schema,
            DEFAULT_SECTIONS,
            Value::from(json!({"versionInformation": {"versionTitle": "v2"}})),
        )
        .unwrap();
        assert_eq!(
            form.section("versionInformation").unwrap().data(),
            &Value::from(json!({"versionTitle": "v2"}))
        );
        assert_eq!(
            form.section("workInformation").unwrap().data(),
            &Value::empty_map()
        );
    }

    #[test]
    fn render_mirrors_generated_id_into_combined_tree() {
        let schema = schema();
        let mut form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        let view = form.render().unwrap();

        assert_eq!(view.sections.len(), 3);
        assert_eq!(view.title.as_deref(), Some("ELMS 3.0 Work Record"));
        assert!(matches!(
            form.data().get(&path("workInformation.workId")),
            Some(Value::Text(id)) if id.len() == 36
        ));
        assert_eq!(form.data().get(&path("versionInformation")), None);
    }

    #[test]
    fn apply_input_routes_to_section() {
        let schema = schema();
        let mut form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        form.apply_input(&path("versionInformation.originalPublicationYear"), "1987x")
            .unwrap();
        assert_eq!(
            serde_json::Value::from(form.data()),
            json!({"versionInformation": {"originalPublicationYear": 1987}})
        );

        assert!(matches!(
            form.apply_input(&path("copyInformation.0.copyId"), "c1"),
            Err(FormError::SectionNotFound(_))
        ));
        assert!(matches!(
            form.apply_input(&path("versionInformation"), "x"),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn submit_rejects_and_annotates_fields() {
        let schema = schema();
        let mut form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        form.render().unwrap();
        form.apply_input(&path("versionInformation.eldLink"), "not-a-url")
            .unwrap();

        let Submission::Rejected { result, message } = form.submit() else {
            panic!("expected rejection");
        };
        assert!(!result.is_valid);
        assert!(message.contains("versionInformation.eldLink: versionInformation.eldLink must be a valid URL"));
        assert!(message.contains("workInformation.workTitle: workTitle is required in work information"));

        let version = form.section("versionInformation").unwrap();
        assert_eq!(
            version.errors().get(&path("eldLink")).map(String::as_str),
            Some("versionInformation.eldLink must be a valid URL")
        );
    }

    #[test]
    fn submit_accepts_complete_record() {
        let schema = schema();
        let mut form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        form.render().unwrap();
        for (field, raw) in [
            ("workInformation.workTitle", "Afternoon, a story"),
            ("versionInformation.versionTitle", "Eastgate 1990"),
            ("versionInformation.originalPublicationYear", "1990"),
        ] {
            form.apply_input(&path(field), raw).unwrap();
        }
        let submission = form.submit();
        assert!(submission.is_accepted(), "{submission:?}");
    }

    #[test]
    fn clear_resets_everything() {
        let schema = schema();
        let mut form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        form.render().unwrap();
        form.apply_input(&path("accessibilityInformation.hasAltText"), "yes")
            .unwrap();
        form.clear().unwrap();

        assert_eq!(form.data(), &Value::empty_map());
        assert_eq!(form.section_keys().count(), 3);
        assert_eq!(
            form.section("workInformation").unwrap().data(),
            &Value::empty_map()
        );
    }

    #[test]
    fn record_scope_uses_root_required_and_field_ids() {
        let schema = schema();
        let form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        let fields = form.render_record();

        let work = fields.iter().find(|f| f.name == "workInformation").unwrap();
        assert!(work.required);
        assert_eq!(work.id, "field-workInformation");
        let access = fields
            .iter()
            .find(|f| f.name == "accessibilityInformation")
            .unwrap();
        assert!(!access.required);
    }

    #[test]
    fn export_is_pretty_json() {
        let schema = schema();
        let mut form = Form::open(&schema, DEFAULT_SECTIONS, Value::empty_map()).unwrap();
        form.apply_input(&path("accessibilityInformation.accessibilityNotes"), "none")
            .unwrap();
        assert_eq!(
            form.export_json().unwrap(),
            "{\n  \"accessibilityInformation\": {\n    \"accessibilityNotes\": \"none\"\n  }\n}"
        );
    }
}
