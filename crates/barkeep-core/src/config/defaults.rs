//! Default values for configuration types.
//!
//! Used both by `Default` implementations and by serde
//! `#[serde(default = "...")]` attributes.

use std::time::Duration;

use crate::config::types::{DirectoryConfig, RelocationConfig};
use crate::input::{DEFAULT_EVENT_TIMEOUT, TapLocation};
use crate::relocation::{DEFAULT_DRAG_DELAY, RelocationSettings};
use crate::window::SnapshotScope;

pub fn default_event_timeout_ms() -> u64 {
    DEFAULT_EVENT_TIMEOUT.as_millis() as u64
}

pub fn default_drag_delay_ms() -> u64 {
    DEFAULT_DRAG_DELAY.as_millis() as u64
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            event_timeout_ms: default_event_timeout_ms(),
            drag_delay_ms: default_drag_delay_ms(),
            tap_location: TapLocation::default(),
        }
    }
}

impl RelocationConfig {
    pub fn settings(&self) -> RelocationSettings {
        RelocationSettings {
            event_timeout: Duration::from_millis(self.event_timeout_ms),
            drag_delay: Duration::from_millis(self.drag_delay_ms),
            tap_location: self.tap_location,
        }
    }
}

impl DirectoryConfig {
    pub fn scope(&self) -> SnapshotScope {
        SnapshotScope::from_on_screen_only(self.on_screen_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocation_defaults_match_engine_defaults() {
        let config = RelocationConfig::default();
        assert_eq!(config.event_timeout_ms, 100);
        assert_eq!(config.drag_delay_ms, 25);
        assert_eq!(config.settings(), RelocationSettings::default());
    }

    #[test]
    fn test_directory_defaults() {
        let config = DirectoryConfig::default();
        assert!(!config.on_screen_only);
        assert_eq!(config.scope(), SnapshotScope::All);
    }
}
