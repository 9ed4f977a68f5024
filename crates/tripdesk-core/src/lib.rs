pub mod booking;
pub mod call;
pub mod carousel;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod timer;
pub mod view;

// Re-export common error type
pub use error::TripdeskError;
