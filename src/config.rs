//! TOML-based application configuration.
//!
//! Read from `~/.config/daily-habits/config.toml`. Every field is optional;
//! a missing file yields the defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "daily-habits";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overrides where habit data is stored.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Log this application's records at debug level instead of info.
    #[serde(default)]
    pub debug_logging: bool,
}

impl AppConfig {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Loads the config from its default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Directory holding the preference files.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(!cfg.debug_logging);
    }

    #[test]
    fn parses_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/habits\"\ndebug_logging = true\n").unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert!(cfg.debug_logging);
        assert_eq!(cfg.data_dir(), Some(PathBuf::from("/tmp/habits")));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: AppConfig = toml::from_str("debug_logging = true").unwrap();
        assert!(cfg.debug_logging);
        assert!(cfg.data_dir.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "debug_logging = \"sometimes\"").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
