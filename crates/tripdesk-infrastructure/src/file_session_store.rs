//! File-backed session slot.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use tripdesk_core::error::{Result, TripdeskError};
use tripdesk_core::session::SessionStore;

use crate::paths::TripdeskPaths;

/// Session slot stored as a single file.
///
/// The file holds whatever string the session manager wrote; this type does
/// not parse it. Writes go through a temporary file and an atomic rename so a
/// crash never leaves a half-written slot.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the default location (`~/.config/tripdesk/currentUser.json`).
    pub fn default_location() -> Result<Self> {
        let path = TripdeskPaths::session_file().map_err(|e| TripdeskError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| TripdeskError::io(format!("Invalid slot path: {:?}", self.path)))?;
        Ok(self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        // Undecodable bytes are handed back lossily so the caller sees a
        // malformed record and clears it.
        let bytes = fs::read(&self.path)?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("[SessionStore] {:?} is not valid UTF-8", self.path);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn write(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(raw.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!("[SessionStore] Wrote {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("[SessionStore] Removed {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
