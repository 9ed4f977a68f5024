//! Simulated video call.
//!
//! No media is captured or sent. The state only decides which controls a
//! presentation layer shows.

mod model;
mod simulator;

pub use model::{CallState, CallTransition, CallTrigger, MuteFlags};
pub use simulator::{CallError, CallSimulator, CallStep};
