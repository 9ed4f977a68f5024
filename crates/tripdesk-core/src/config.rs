//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default, so an empty or partial file is valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay before an agent's inbound call rings.
pub const DEFAULT_RING_DELAY_MS: u64 = 3_000;
/// Default simulated connection setup time.
pub const DEFAULT_CONNECT_DELAY_MS: u64 = 3_000;
/// Default carousel auto-scroll interval.
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 5_000;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub ring_delay_ms: u64,
    pub connect_delay_ms: u64,
    /// `0` disables carousel auto-scroll.
    pub carousel_interval_ms: u64,
    pub carousel_items: usize,
    pub carousel_visible: usize,
    /// Overrides the default session file location.
    pub session_file: Option<PathBuf>,
    /// Log level filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ring_delay_ms: DEFAULT_RING_DELAY_MS,
            connect_delay_ms: DEFAULT_CONNECT_DELAY_MS,
            carousel_interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
            carousel_items: 6,
            carousel_visible: 3,
            session_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn ring_delay(&self) -> Duration {
        Duration::from_millis(self.ring_delay_ms)
    }

    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn carousel_interval(&self) -> Option<Duration> {
        (self.carousel_interval_ms > 0).then(|| Duration::from_millis(self.carousel_interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ring_delay(), Duration::from_secs(3));
        assert_eq!(config.connect_delay(), Duration::from_secs(3));
        assert_eq!(config.carousel_interval(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("connect_delay_ms = 500").unwrap();
        assert_eq!(config.connect_delay_ms, 500);
        assert_eq!(config.ring_delay_ms, DEFAULT_RING_DELAY_MS);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_interval_disables_carousel() {
        let config = AppConfig {
            carousel_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.carousel_interval(), None);
    }
}
