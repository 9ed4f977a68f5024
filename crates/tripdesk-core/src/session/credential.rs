//! The demo credential table.

use super::model::{Role, Session};

/// Secret shared by every demo account.
pub const DEMO_SECRET: &str = "password123";

/// One row of the credential table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub identity: String,
    pub secret: String,
    pub role: Role,
    pub display_name: String,
}

impl Account {
    fn demo(identity: &str, role: Role, display_name: &str) -> Self {
        Self {
            identity: identity.to_string(),
            secret: DEMO_SECRET.to_string(),
            role,
            display_name: display_name.to_string(),
        }
    }

    /// Builds the session this account signs in as.
    pub fn to_session(&self) -> Session {
        Session::new(&self.identity, self.role, &self.display_name)
    }
}

/// Immutable identity → account mapping, kept in declaration order.
///
/// Built once at startup and shared; nothing writes to it afterwards.
#[derive(Debug, Clone)]
pub struct CredentialTable {
    accounts: Vec<Account>,
}

impl CredentialTable {
    /// The six public demo accounts.
    pub fn demo() -> Self {
        Self {
            accounts: vec![
                Account::demo("customer", Role::Customer, "John Doe"),
                Account::demo("agent", Role::Agent, "Agent Smith"),
                Account::demo("customer1", Role::Customer, "Jane Smith"),
                Account::demo("customer2", Role::Customer, "Bob Johnson"),
                Account::demo("agent1", Role::Agent, "Sarah Wilson"),
                Account::demo("agent2", Role::Agent, "Mike Davis"),
            ],
        }
    }

    pub fn get(&self, identity: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.identity == identity)
    }

    /// Returns the account iff `identity` exists and `secret` matches exactly.
    pub fn verify(&self, identity: &str, secret: &str) -> Option<&Account> {
        self.get(identity).filter(|a| a.secret == secret)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// `(identity, role)` pairs for the rejection message.
    pub fn listing(&self) -> Vec<(String, Role)> {
        self.accounts
            .iter()
            .map(|a| (a.identity.clone(), a.role))
            .collect()
    }

    /// The secret every account uses, if they all use the same one.
    pub fn shared_secret(&self) -> Option<&str> {
        let first = self.accounts.first()?;
        self.accounts
            .iter()
            .all(|a| a.secret == first.secret)
            .then_some(first.secret.as_str())
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self::demo()
    }
}
