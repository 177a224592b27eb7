//! Application configuration.
//!
//! A small YAML file (`budget.yaml`) in the data directory selects the
//! persistence variant and optionally overrides where local data lives.
//! A missing or unparseable file falls back to defaults; the app must always
//! be able to start.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "budget.yaml";

/// Which persistence variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Durable local snapshot store; no authentication.
    #[default]
    Local,
    /// Per-user document collections behind the session manager.
    Remote,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: StoreMode,
    /// Overrides the platform data directory when set.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Platform data directory for this app (`~/.local/share/budget-tracker`
    /// or the OS equivalent).
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("budget-tracker")
    }

    /// The directory local data and the config file live in.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Load from the default location.
    pub fn load() -> Self {
        Self::load_from(Self::default_data_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path, falling back to defaults when the file is
    /// absent or does not parse.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                info!("no config at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_yaml::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!("config at {} did not parse: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(dir.path().join("budget.yaml"));
        assert_eq!(config.mode, StoreMode::Local);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn parses_mode_and_data_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.yaml");
        fs::write(&path, "mode: remote\ndata_dir: /tmp/budget-data\n").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.mode, StoreMode::Remote);
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/tmp/budget-data"));
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.yaml");
        fs::write(&path, "mode: [not, a, mode").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.mode, StoreMode::Local);
    }
}
