//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session` and `Role`
//! - `credential`: the static demo credential table
//! - `store`: the single storage slot trait and its in-memory implementation
//! - `manager`: login / restore / logout

mod credential;
mod manager;
mod model;
mod store;

pub use credential::{Account, CredentialTable, DEMO_SECRET};
pub use manager::{LoginError, SessionManager};
pub use model::{Role, Session};
pub use store::{MemorySessionStore, SessionStore, SESSION_SLOT_KEY};
