use std::sync::Arc;

use thiserror::Error;

use super::credential::CredentialTable;
use super::model::{Role, Session};
use super::store::SessionStore;
use crate::error::TripdeskError;

/// Why a login attempt was turned away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Unknown identity or wrong secret.
    #[error("{}", invalid_credentials_message(.accounts, .shared_secret.as_deref()))]
    InvalidCredentials {
        /// Every valid demo identity with its role, in table order.
        accounts: Vec<(String, Role)>,
        /// Present when all demo accounts share one secret.
        shared_secret: Option<String>,
    },

    /// The credentials were fine but the session could not be persisted.
    #[error("Failed to persist session: {0}")]
    Storage(TripdeskError),
}

impl LoginError {
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. })
    }
}

fn invalid_credentials_message(accounts: &[(String, Role)], shared_secret: Option<&str>) -> String {
    let listing = accounts
        .iter()
        .map(|(identity, role)| format!("{} ({})", identity, role))
        .collect::<Vec<_>>()
        .join(", ");
    let mut message = format!("Invalid credentials.\n\nAvailable demo accounts:\n{}", listing);
    if let Some(secret) = shared_secret {
        message.push_str(&format!("\n\nPassword for all accounts: {}", secret));
    }
    message
}

/// Owns the credential lookup and the single persisted session slot.
///
/// `SessionManager` is responsible for:
/// - Matching credentials against the demo table
/// - Persisting the signed-in session (overwriting any previous one)
/// - Restoring it on startup, self-healing when the slot holds garbage
/// - Clearing it on logout
///
/// Scheduling the agent's inbound call is left to the application root,
/// which owns the timers.
#[derive(Clone)]
pub struct SessionManager {
    credentials: Arc<CredentialTable>,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(credentials: Arc<CredentialTable>, store: Arc<dyn SessionStore>) -> Self {
        Self { credentials, store }
    }

    /// Signs in and persists the resulting session.
    ///
    /// # Errors
    ///
    /// - `LoginError::InvalidCredentials` if the identity is unknown or the
    ///   secret does not match exactly. Nothing is written in that case.
    /// - `LoginError::Storage` if the slot cannot be written.
    pub fn login(&self, identity: &str, secret: &str) -> Result<Session, LoginError> {
        let Some(account) = self.credentials.verify(identity, secret) else {
            tracing::info!("[Session] Rejected login for '{}'", identity);
            return Err(LoginError::InvalidCredentials {
                accounts: self.credentials.listing(),
                shared_secret: self.credentials.shared_secret().map(str::to_string),
            });
        };

        let session = account.to_session();
        let raw = serde_json::to_string(&session)
            .map_err(|e| LoginError::Storage(TripdeskError::from(e)))?;
        self.store.write(&raw).map_err(LoginError::Storage)?;

        tracing::info!(
            "[Session] Signed in '{}' as {} ({})",
            session.identity,
            session.role,
            session.display_name
        );
        Ok(session)
    }

    /// Reads back the persisted session, if any.
    ///
    /// Never fails: a slot that cannot be read counts as empty, and a slot
    /// whose contents do not parse as a `Session` is cleared.
    pub fn restore(&self) -> Option<Session> {
        let raw = match self.store.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("[Session] Failed to read session slot: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                tracing::info!(
                    "[Session] Restored '{}' as {}",
                    session.identity,
                    session.role
                );
                Some(session)
            }
            Err(e) => {
                tracing::warn!("[Session] Discarding malformed persisted session: {}", e);
                if let Err(e) = self.store.clear() {
                    tracing::warn!("[Session] Failed to clear session slot: {}", e);
                }
                None
            }
        }
    }

    /// Clears the slot. Idempotent.
    pub fn logout(&self) {
        match self.store.clear() {
            Ok(()) => tracing::info!("[Session] Signed out"),
            Err(e) => tracing::warn!("[Session] Failed to clear session slot: {}", e),
        }
    }
}
