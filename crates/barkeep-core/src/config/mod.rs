//! # Configuration System
//!
//! TOML configuration for barkeep, read from `~/.barkeep/config.toml`.
//! Every value has a built-in default; a missing file is not an error.
//!
//! ```toml
//! [relocation]
//! event_timeout_ms = 150
//! tap_location = "hid"
//!
//! [directory]
//! on_screen_only = true
//! ```
//!
//! ```rust,no_run
//! use barkeep_core::config::BarkeepConfig;
//!
//! fn example() -> Result<(), barkeep_core::errors::ConfigError> {
//!     let config = BarkeepConfig::load_hierarchy()?;
//!     let settings = config.relocation.settings();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{BarkeepConfig, DirectoryConfig, RelocationConfig};
pub use validation::validate_config;

use crate::errors::ConfigError;

impl BarkeepConfig {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }
}
