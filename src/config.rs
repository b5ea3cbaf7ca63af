// Configuration loaded from YAML

use crate::error::{Result, TaskError};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "tasktrack";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where CSV exports are written
    pub export_dir: PathBuf,
    /// Colorize console output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file
    pub fn load(path: &Path) -> Result<Self> {
        let config_err = |reason: String| TaskError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| config_err(e.to_string()))?;
        let config: Config = serde_yaml::from_reader(file).map_err(|e| config_err(e.to_string()))?;

        info!(path = ?path, "Loaded config");
        Ok(config)
    }

    /// Load from `path` when given, else from the user config directory if a file
    /// exists there, else fall back to defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/tasktrack/config.yaml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.color);
    }

    #[test]
    fn test_empty_config_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "{}\n").unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "export_dir: /tmp/exports\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert!(config.color);
    }

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "export_dir: out\ncolor: false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("out"));
        assert!(!config.color);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::discover(Some(&temp.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, TaskError::Config { .. }));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "color: [not, a, bool\n").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
