use std::path::{Path, PathBuf};

use anyhow::Context;
use elms_config::ElmsConfig;
use elms_core::Value;
use elms_schema::SchemaDocument;

/// Configuration and schema loaded once at startup.
#[derive(Debug)]
pub struct AppContext {
    pub config: ElmsConfig,
    pub schema: SchemaDocument,
}

impl AppContext {
    /// Load config (with `.env`), then the schema named by `schema_override`,
    /// `form.schema_path`, or the bundled document, in that order.
    pub fn load(schema_override: Option<&Path>) -> anyhow::Result<Self> {
        let config = ElmsConfig::load_with_dotenv().context("failed to load elms configuration")?;
        let schema = load_schema(schema_override.or(config.form.schema_path.as_deref()))?;
        Ok(Self { config, schema })
    }

    /// Sections named on the command line, or the configured defaults.
    pub fn sections<'a>(&'a self, requested: &'a [String]) -> &'a [String] {
        if requested.is_empty() {
            &self.config.form.sections
        } else {
            requested
        }
    }
}

fn load_schema(path: Option<&Path>) -> anyhow::Result<SchemaDocument> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading schema document");
            SchemaDocument::load(path)
                .with_context(|| format!("failed to load schema from {}", path.display()))
        }
        None => SchemaDocument::bundled().context("bundled schema is unreadable"),
    }
}

/// Read a JSON record, or start from an empty one.
pub fn read_record(path: Option<&PathBuf>) -> anyhow::Result<Value> {
    let Some(path) = path else {
        return Ok(Value::empty_map());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("record {} is not valid JSON", path.display()))?;
    Ok(Value::from(raw))
}

/// Write a record back as pretty JSON.
pub fn write_record(path: &Path, record: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(record)?;
    std::fs::write(path, text + "\n")
        .with_context(|| format!("failed to write record {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn missing_record_path_starts_empty() {
        assert_eq!(read_record(None).unwrap(), Value::empty_map());
    }

    #[test]
    fn record_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        let record = Value::from(json!({"workInformation": {"workTitle": "Twelve Blue"}}));

        write_record(&path, &record).unwrap();
        assert_eq!(read_record(Some(&path)).unwrap(), record);
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();

        let err = read_record(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn schema_override_must_exist() {
        let err = load_schema(Some(Path::new("/nonexistent/schema.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schema"));
        assert!(load_schema(None).is_ok());
    }
}
