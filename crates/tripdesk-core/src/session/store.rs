//! Session storage slot.

use std::sync::Mutex;

use crate::error::{Result, TripdeskError};

/// Key of the single slot holding the serialized session.
pub const SESSION_SLOT_KEY: &str = "currentUser";

/// A single opaque key-value slot holding the serialized session.
///
/// The store knows nothing about the record's shape; parsing and
/// self-healing on bad contents belong to `SessionManager`.
pub trait SessionStore: Send + Sync {
    /// Reads the raw slot contents, `None` when the slot is empty.
    fn read(&self) -> Result<Option<String>>;

    /// Overwrites the slot.
    fn write(&self, raw: &str) -> Result<()>;

    /// Empties the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-process slot. Used by tests and by the CLI's `--ephemeral` mode.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose slot already holds `raw`.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|e| TripdeskError::internal(format!("session slot poisoned: {}", e)))
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, raw: &str) -> Result<()> {
        *self.lock()? = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
