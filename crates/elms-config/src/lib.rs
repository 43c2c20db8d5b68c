//! # elms-config
//!
//! Layered configuration loading for the ELMS form tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ELMS_*` prefix, `__` as separator)
//! 2. Project-level `.elms/config.toml`
//! 3. User-level `~/.config/elms/config.toml`
//! 4. Built-in defaults
//!
//! `ELMS_FORM__SCHEMA_PATH` maps to `form.schema_path`,
//! `ELMS_OUTPUT__FORMAT` to `output.format`.
//!
//! ```no_run
//! use elms_config::ElmsConfig;
//!
//! let config = ElmsConfig::load_with_dotenv().expect("config");
//! for section in &config.form.sections {
//!     println!("{section}");
//! }
//! ```

mod error;
mod form;
mod output;

pub use error::ConfigError;
pub use form::FormConfig;
pub use output::{OutputConfig, OutputFormat};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project-local config directory.
pub const PROJECT_DIR: &str = ".elms";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ElmsConfig {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ElmsConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`ElmsConfig::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` for unreadable or mistyped sources and
    /// `ConfigError::InvalidValue` for values that fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` first, then everything [`ElmsConfig::load`] reads.
    ///
    /// # Errors
    ///
    /// Same as [`ElmsConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`ElmsConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.form.validate()?;
        Ok(config)
    }

    /// Build the provider chain. Public so tests can layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ELMS_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("elms").join("config.toml"))
    }

    /// Walk up from `CARGO_MANIFEST_DIR` looking for `.env`, then fall back to
    /// the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
