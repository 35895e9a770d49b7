//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [relocation]
//! event_timeout_ms = 100
//! drag_delay_ms = 25
//! tap_location = "session"
//!
//! [directory]
//! on_screen_only = false
//! ```

use serde::{Deserialize, Serialize};

use crate::input::TapLocation;

/// Main configuration loaded from `~/.barkeep/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BarkeepConfig {
    /// Synthetic drag tuning
    #[serde(default)]
    pub relocation: RelocationConfig,

    /// Item directory query defaults
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Relocation configuration.
///
/// Applies to every move; there is no per-call override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationConfig {
    /// How long to wait for each synthetic event to be confirmed.
    /// Default: 100ms.
    #[serde(default = "super::defaults::default_event_timeout_ms")]
    pub event_timeout_ms: u64,

    /// Pause between mouse-down and mouse-up.
    /// Default: 25ms.
    #[serde(default = "super::defaults::default_drag_delay_ms")]
    pub drag_delay_ms: u64,

    /// Where events are posted and observed.
    #[serde(default)]
    pub tap_location: TapLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    /// List only windows that are currently on screen.
    #[serde(default)]
    pub on_screen_only: bool,
}
