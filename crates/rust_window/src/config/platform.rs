//! Platform context configuration

use serde::{Deserialize, Serialize};

use super::Config;

/// Sizes of the fixed-capacity pools and context-wide switches
///
/// Every pool is allocated once from these values when the context is
/// initialized; nothing on the event path grows afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Number of events the queue holds before it is flushed
    pub event_queue_capacity: usize,
    /// Number of monitor nodes in the registry pool
    pub monitor_capacity: usize,
    /// Paths kept per drop on a window
    pub max_drops: usize,
    /// Bytes reserved for the clipboard buffer
    pub clipboard_capacity: usize,
    /// Characters of text input kept per poll pass
    pub char_queue_capacity: usize,
    /// Whether events are queued (callbacks fire either way)
    pub queue_events: bool,
    /// Bind the fallback backend when the preferred one fails
    pub allow_fallback: bool,
    /// Default log filter used by [`crate::foundation::logging::init`]
    pub log_level: String,
}

impl PlatformConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event queue capacity
    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }

    /// Set the monitor pool size
    pub fn with_monitor_capacity(mut self, capacity: usize) -> Self {
        self.monitor_capacity = capacity;
        self
    }

    /// Set the per-window drop buffer size
    pub fn with_max_drops(mut self, max: usize) -> Self {
        self.max_drops = max;
        self
    }

    /// Set the clipboard buffer size
    pub fn with_clipboard_capacity(mut self, bytes: usize) -> Self {
        self.clipboard_capacity = bytes;
        self
    }

    /// Set how many typed characters a poll pass keeps
    pub fn with_char_queue_capacity(mut self, capacity: usize) -> Self {
        self.char_queue_capacity = capacity;
        self
    }

    /// Enable or disable event queueing
    pub fn with_queue_events(mut self, enabled: bool) -> Self {
        self.queue_events = enabled;
        self
    }

    /// Allow or forbid falling back to the secondary backend
    pub fn with_fallback(mut self, allowed: bool) -> Self {
        self.allow_fallback = allowed;
        self
    }

    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.event_queue_capacity == 0 {
            return Err("Event queue capacity must be greater than 0".to_string());
        }
        if self.monitor_capacity == 0 || self.monitor_capacity > usize::from(u16::MAX) {
            return Err(format!(
                "Monitor capacity must be between 1 and {}",
                u16::MAX
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            event_queue_capacity: 32,
            monitor_capacity: 6,
            max_drops: 260,
            clipboard_capacity: 4096,
            char_queue_capacity: 16,
            queue_events: true,
            allow_fallback: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config for PlatformConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rust_window_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = PlatformConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.event_queue_capacity, 32);
        assert_eq!(config.monitor_capacity, 6);
        assert_eq!(config.max_drops, 260);
        assert_eq!(config.char_queue_capacity, 16);
    }

    #[test]
    fn test_validation_rejects_empty_pools() {
        assert!(PlatformConfig::new().with_event_queue_capacity(0).validate().is_err());
        assert!(PlatformConfig::new().with_monitor_capacity(0).validate().is_err());
        assert!(PlatformConfig::new().with_log_level(" ").validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("config.toml");
        let config = PlatformConfig::new()
            .with_event_queue_capacity(64)
            .with_fallback(false)
            .with_log_level("debug");

        config.save_to_file(&path).expect("save toml");
        let loaded = PlatformConfig::load_from_file(&path).expect("load toml");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("config.ron");
        let config = PlatformConfig::new().with_monitor_capacity(2).with_queue_events(false);

        config.save_to_file(&path).expect("save ron");
        let loaded = PlatformConfig::load_from_file(&path).expect("load ron");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "max_drops = 8\n").expect("write partial");
        let loaded = PlatformConfig::load_from_file(&path).expect("load partial");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.max_drops, 8);
        assert_eq!(loaded.event_queue_capacity, 32);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = PlatformConfig::default().save_to_file(temp_path("config.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let loaded = PlatformConfig::load_or_default(temp_path("missing.toml")).expect("defaults");
        assert_eq!(loaded, PlatformConfig::default());
    }
}
