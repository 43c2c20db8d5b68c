use std::path::PathBuf;

use elms_config::{ElmsConfig, OutputFormat};
use figment::Jail;

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("ELMS_OUTPUT__FORMAT", "raw");
        jail.set_env("ELMS_FORM__SCHEMA_PATH", "/srv/elms/schema.json");

        let config = ElmsConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.output.format, OutputFormat::Raw);
        assert_eq!(
            config.form.schema_path,
            Some(PathBuf::from("/srv/elms/schema.json"))
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".elms")).map_err(|e| e.to_string())?;
        jail.create_file(".elms/config.toml", "[output]\nformat = \"json\"\n")?;
        jail.set_env("ELMS_OUTPUT__FORMAT", "text");

        let config = ElmsConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.output.format, OutputFormat::Text);
        Ok(())
    });
}

#[test]
fn dotenv_file_feeds_env_layer() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "ELMS_OUTPUT__FORMAT=json\n")?;
        dotenvy::from_path(jail.directory().join(".env")).map_err(|e| e.to_string())?;

        let config = ElmsConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.output.format, OutputFormat::Json);
        Ok(())
    });
}
