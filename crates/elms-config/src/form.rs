//! Form configuration.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_sections() -> Vec<String> {
    ["workInformation", "versionInformation", "accessibilityInformation"]
        .map(String::from)
        .to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormConfig {
    /// Schema document to load instead of the bundled ELMS 3.0 schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,

    /// Section keys rendered when a command names none.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            schema_path: None,
            sections: default_sections(),
        }
    }
}

impl FormConfig {
    /// Reject an empty section list and repeated keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming `form.sections`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "form.sections".into(),
                reason: "at least one section is required".into(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = self.sections.iter().find(|key| !seen.insert(key.as_str())) {
            return Err(ConfigError::InvalidValue {
                field: "form.sections".into(),
                reason: format!("section '{repeated}' is listed twice"),
            });
        }
        Ok(())
    }
}
