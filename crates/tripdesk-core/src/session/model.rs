//! Session domain model.
//!
//! A `Session` is the authenticated-identity record of whoever is using the
//! app right now. It is the only thing tripdesk ever persists.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::view::View;

/// The role an account signs in as.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Customer,
    Agent,
}

impl Role {
    /// The dashboard this role lands on after signing in.
    pub fn dashboard(self) -> View {
        match self {
            Role::Customer => View::CustomerDashboard,
            Role::Agent => View::AgentDashboard,
        }
    }

    /// Whether this role may be rung by an inbound call.
    pub fn receives_calls(self) -> bool {
        matches!(self, Role::Agent)
    }
}

/// The authenticated-identity record.
///
/// Serialized as `{"identity": .., "role": .., "displayName": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Login identity (e.g. `agent1`)
    pub identity: String,
    /// Account role
    pub role: Role,
    /// Name shown on the dashboard
    pub display_name: String,
}

impl Session {
    pub fn new(identity: impl Into<String>, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            role,
            display_name: display_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serializes_with_camel_case_fields() {
        let session = Session::new("agent1", Role::Agent, "Sarah Wilson");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "identity": "agent1",
                "role": "agent",
                "displayName": "Sarah Wilson"
            })
        );
    }

    #[test]
    fn test_session_rejects_unknown_role() {
        let raw = r#"{"identity":"x","role":"admin","displayName":"X"}"#;
        assert!(serde_json::from_str::<Session>(raw).is_err());
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("agent".parse::<Role>().unwrap(), Role::Agent);
        assert_eq!(Role::Customer.to_string(), "customer");
        assert!("pilot".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_dashboard() {
        assert_eq!(Role::Customer.dashboard(), View::CustomerDashboard);
        assert_eq!(Role::Agent.dashboard(), View::AgentDashboard);
        assert!(Role::Agent.receives_calls());
        assert!(!Role::Customer.receives_calls());
    }
}
