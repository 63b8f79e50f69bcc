use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use super::{Config, ConfigPaths};
use crate::core::{Error, Result};

impl Config {
    /// Loads the main configuration file, or defaults if it does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_from(&path)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(err) => return Err(Error::io(err, path)),
        };

        Self::parse(&content, Some(path))
    }

    /// Parses and validates TOML configuration.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or a value is invalid.
    pub fn parse(content: &str, path: Option<&Path>) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(|e| Error::toml_parse(e, path))?;
        config.bluez.validate()?;
        Ok(config)
    }

    /// JSON schema of the configuration file, pretty-printed.
    ///
    /// # Errors
    /// Returns error if the schema cannot be serialized.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| Error::ConfigValidation {
            component: "schema".to_string(),
            details: e.to_string(),
        })
    }
}
