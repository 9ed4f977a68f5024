//! Loads `AppConfig` from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use tripdesk_core::config::AppConfig;
use tripdesk_core::error::{Result, TripdeskError};

use crate::paths::TripdeskPaths;

/// Reads `config.toml`.
///
/// Responsibilities:
/// - Resolve the config file path (explicit or default)
/// - Parse TOML into `AppConfig`
///
/// Does NOT:
/// - Write the config file (tripdesk never modifies it)
/// - Apply CLI overrides (the binary does that)
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loader for `~/.config/tripdesk/config.toml`.
    pub fn default_location() -> Result<Self> {
        let path = TripdeskPaths::config_file().map_err(|e| TripdeskError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config.
    ///
    /// A missing or empty file yields `AppConfig::default()`. A file that
    /// exists but does not parse is an error.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] {:?} not found, using defaults", self.path);
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        let config: AppConfig = toml::from_str(&content)?;
        tracing::info!("[Config] Loaded {:?}", self.path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(dir.path().join("config.toml"));
        assert_eq!(loader.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_loads_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "ring_delay_ms = 100\nconnect_delay_ms = 200\nsession_file = \"/tmp/slot.json\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new(path).load().unwrap();
        assert_eq!(config.ring_delay_ms, 100);
        assert_eq!(config.connect_delay_ms, 200);
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/slot.json")));
        assert_eq!(config.carousel_items, 6);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "ring_delay_ms = \"soon\"").unwrap();

        let err = ConfigLoader::new(path).load().unwrap_err();
        assert!(err.is_serialization());
    }
}
