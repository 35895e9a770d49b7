//! barkeep-core: Core library for menu bar item discovery and relocation
//!
//! This library finds the status items living in the macOS menu bar and
//! reorders them by synthesizing the Command-drag a user would perform.
//!
//! # Main Entry Points
//!
//! - [`items`] - Classify window snapshots into the menu bar and its items
//! - [`input`] - Post synthetic events and confirm their delivery
//! - [`relocation`] - Move an item to the left or right of another item
//! - [`platform`] - Core Graphics backends (macOS only)
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod input;
pub mod items;
pub mod logging;
pub mod platform;
pub mod relocation;
pub mod window;

// Re-export commonly used types at crate root for convenience
pub use config::BarkeepConfig;
pub use errors::{BarkeepError, BarkeepResult, ConfigError};
pub use geometry::{Point, Rect};
pub use input::{
    CursorControl, InputBackend, InputError, MouseEventKind, SyntheticEvent,
    SyntheticInputChannel, TapLocation,
};
pub use items::{ItemDirectory, ItemKey, MenuBarItem, MenuBarWindow};
pub use relocation::{
    Destination, MoveError, MoveOutcome, MoveRequest, RelocationEngine, RelocationSettings,
};
pub use window::{DisplayInfo, SnapshotScope, WindowError, WindowRecord, WindowSource};

// Re-export logging initialization
pub use logging::init_logging;
