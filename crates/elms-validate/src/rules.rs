//! The ELMS rule set and the validator that applies it.
//!
//! Rules run in a fixed order and never short-circuit:
//!
//! ```text
//! root required → section required → URL format → year range
//!   → copyInformation → entityInformation → worksExternalLinkInformation
//! ```

use elms_core::{FieldPath, Value};
use elms_schema::SchemaDocument;

use crate::report::{ValidationError, ValidationResult};

/// Sections whose own `required` list is checked, with the phrase used in
/// messages.
pub const REQUIRED_SECTIONS: &[(&str, &str)] = &[
    ("workInformation", "work information"),
    ("versionInformation", "version information"),
];

/// Fields that must hold an absolute URL when filled in.
pub const URL_FIELDS: &[&str] = &[
    "versionInformation.imageThumbnail",
    "versionInformation.originalPublisherAuthority",
    "versionInformation.eldLink",
    "versionInformation.elmcipLink",
    "versionInformation.rebootingElectronicLiteratureLink",
    "collectionInformation.collectionHostedUrl",
    "collectionInformation.collectionImage",
    "collectionInformation.collectionHeaderImage",
    "collectionInformation.collectionVideoLink",
    "collectionInformation.collectionVideoExternalLink",
    "collectionInformation.collectionVideoThumbnail",
];

/// Fields that must hold a year in `MIN_YEAR..=MAX_YEAR` when filled in.
pub const YEAR_FIELDS: &[&str] = &[
    "versionInformation.originalPublicationYear",
    "collectionInformation.startYearCollected",
    "collectionInformation.endYearCollected",
];

pub const MIN_YEAR: i64 = 1950;
pub const MAX_YEAR: i64 = 2100;

/// Required members of every element of a top-level array.
#[derive(Debug, Clone, Copy)]
pub struct ElementRule {
    pub array: &'static str,
    /// Noun used in messages, numbered from 1 (`copy 1`, `entity 2`).
    pub noun: &'static str,
    /// `(field, label)` pairs checked independently.
    pub fields: &'static [(&'static str, &'static str)],
}

pub const ELEMENT_RULES: &[ElementRule] = &[
    ElementRule {
        array: "copyInformation",
        noun: "copy",
        fields: &[("copyId", "Copy ID")],
    },
    ElementRule {
        array: "entityInformation",
        noun: "entity",
        fields: &[
            ("entityName", "Entity name"),
            ("entityId", "Entity ID"),
            ("role", "Role"),
        ],
    },
    ElementRule {
        array: "worksExternalLinkInformation",
        noun: "link",
        fields: &[
            ("externalLinkName", "External link name"),
            ("externalLinkId", "External link ID"),
            ("externalLinkUrl", "External link URL"),
        ],
    },
];

/// Applies the ELMS rule set against one schema document.
///
/// Pure: the same tree always yields the same errors in the same order.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'s> {
    schema: &'s SchemaDocument,
}

impl<'s> Validator<'s> {
    #[must_use]
    pub const fn new(schema: &'s SchemaDocument) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn validate(&self, data: &Value) -> ValidationResult {
        let mut errors = Vec::new();

        self.check_root_required(data, &mut errors);
        self.check_section_required(data, &mut errors);
        check_urls(data, &mut errors);
        check_years(data, &mut errors);
        for rule in ELEMENT_RULES {
            check_elements(data, rule, &mut errors);
        }

        tracing::debug!(errors = errors.len(), "validation finished");
        ValidationResult::from_errors(errors)
    }

    fn check_root_required(&self, data: &Value, errors: &mut Vec<ValidationError>) {
        for name in self.schema.root().required.names() {
            if !is_filled(member(data, name)) {
                errors.push(ValidationError::new(
                    name.as_str(),
                    format!("{name} is required"),
                ));
            }
        }
    }

    fn check_section_required(&self, data: &Value, errors: &mut Vec<ValidationError>) {
        for (section, phrase) in REQUIRED_SECTIONS {
            let Some(section_data) = member(data, section).filter(|v| v.is_truthy()) else {
                continue;
            };
            let Some(node) = self.schema.root().property(section) else {
                continue;
            };
            for name in node.required.names() {
                if !is_filled(member(section_data, name)) {
                    errors.push(ValidationError::new(
                        format!("{section}.{name}"),
                        format!("{name} is required in {phrase}"),
                    ));
                }
            }
        }
    }
}

/// Validate `data` against `schema` with the ELMS rule set.
#[must_use]
pub fn validate(data: &Value, schema: &SchemaDocument) -> ValidationResult {
    Validator::new(schema).validate(data)
}

fn check_urls(data: &Value, errors: &mut Vec<ValidationError>) {
    for field in URL_FIELDS {
        let Some(value) = lookup(data, field).filter(|v| v.is_truthy()) else {
            continue;
        };
        if !is_absolute_url(value) {
            errors.push(ValidationError::new(
                *field,
                format!("{field} must be a valid URL"),
            ));
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn check_years(data: &Value, errors: &mut Vec<ValidationError>) {
    let range = (MIN_YEAR as f64)..=(MAX_YEAR as f64);
    for field in YEAR_FIELDS {
        let Some(value) = lookup(data, field).filter(|v| v.is_truthy()) else {
            continue;
        };
        if !value.numeric().is_some_and(|year| range.contains(&year)) {
            errors.push(ValidationError::new(
                *field,
                format!("{field} must be between {MIN_YEAR} and {MAX_YEAR}"),
            ));
        }
    }
}

fn check_elements(data: &Value, rule: &ElementRule, errors: &mut Vec<ValidationError>) {
    let Some(elements) = member(data, rule.array).and_then(Value::as_list) else {
        return;
    };
    for (index, element) in elements.iter().enumerate() {
        for (field, label) in rule.fields {
            if !is_filled(member(element, field)) {
                errors.push(ValidationError::new(
                    format!("{}[{index}].{field}", rule.array),
                    format!("{label} is required for {} {}", rule.noun, index + 1),
                ));
            }
        }
    }
}

fn member<'v>(data: &'v Value, name: &str) -> Option<&'v Value> {
    data.as_map().and_then(|entries| entries.get(name))
}

fn lookup<'v>(data: &'v Value, field: &str) -> Option<&'v Value> {
    field
        .parse::<FieldPath>()
        .ok()
        .and_then(|path| data.get(&path))
}

fn is_filled(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_truthy)
}

fn is_absolute_url(value: &Value) -> bool {
    value
        .scalar_text()
        .is_some_and(|text| url::Url::parse(&text).is_ok())
}
