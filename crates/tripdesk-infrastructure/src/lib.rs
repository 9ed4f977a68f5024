pub mod config_loader;
pub mod file_session_store;
pub mod paths;

pub use crate::config_loader::ConfigLoader;
pub use crate::file_session_store::FileSessionStore;
pub use crate::paths::TripdeskPaths;
