//! Application layer for TRIPDESK.
//!
//! `TravelApp` is the application root that owns all mutable state;
//! `AppRuntime` drives its timers on tokio.

pub mod app;
pub mod runtime;

pub use app::{AppError, TravelApp};
pub use runtime::AppRuntime;
