//! Path management for tripdesk files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tripdesk/          # Config directory (platform equivalent elsewhere)
//! ├── config.toml              # Application configuration
//! └── currentUser.json         # The persisted session slot
//! ```

use std::path::PathBuf;

use tripdesk_core::session::SESSION_SLOT_KEY;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct TripdeskPaths;

impl TripdeskPaths {
    const APP_DIR: &'static str = "tripdesk";

    /// Returns the tripdesk configuration directory (e.g. `~/.config/tripdesk/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default location of the session slot.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(format!("{}.json", SESSION_SLOT_KEY)))
    }
}
