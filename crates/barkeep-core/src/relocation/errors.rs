use crate::errors::BarkeepError;
use crate::input::{InputError, MouseEventKind};
use crate::items::ItemKey;
use crate::window::WindowError;

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("No menu bar found on display {display_id}")]
    NoMenuBarWindow { display_id: u32 },

    #[error("\"{display_name}\" can't be moved")]
    ItemNotMovable { item: ItemKey, display_name: String },

    #[error("'{item}' is no longer in the menu bar")]
    ItemVanished { item: ItemKey },

    #[error("Failed to create the {kind} event for moving \"{display_name}\"")]
    EventConstructionFailure {
        display_name: String,
        kind: MouseEventKind,
    },

    #[error("Moving \"{display_name}\" timed out waiting for the {kind} event ({timeout_ms}ms)")]
    Timeout {
        display_name: String,
        kind: MouseEventKind,
        timeout_ms: u64,
    },

    #[error("Could not read the current mouse location")]
    NoMouseLocation,

    #[error("Failed to read the window list: {source}")]
    Snapshot {
        #[from]
        source: WindowError,
    },

    #[error("Failed to move \"{display_name}\": {source}")]
    Input {
        display_name: String,
        source: InputError,
    },
}

impl MoveError {
    /// Attach the moving item's display name to an input channel failure.
    pub fn from_input(error: InputError, display_name: &str) -> Self {
        let display_name = display_name.to_string();
        match error {
            InputError::EventConstructionFailure { kind } => {
                MoveError::EventConstructionFailure { display_name, kind }
            }
            InputError::Timeout { kind, timeout_ms } => MoveError::Timeout {
                display_name,
                kind,
                timeout_ms,
            },
            InputError::NoMouseLocation => MoveError::NoMouseLocation,
            source => MoveError::Input {
                display_name,
                source,
            },
        }
    }
}

impl BarkeepError for MoveError {
    fn error_code(&self) -> &'static str {
        match self {
            MoveError::NoMenuBarWindow { .. } => "MOVE_NO_MENU_BAR_WINDOW",
            MoveError::ItemNotMovable { .. } => "MOVE_ITEM_NOT_MOVABLE",
            MoveError::ItemVanished { .. } => "MOVE_ITEM_VANISHED",
            MoveError::EventConstructionFailure { .. } => "MOVE_EVENT_CONSTRUCTION_FAILED",
            MoveError::Timeout { .. } => "MOVE_TIMEOUT",
            MoveError::NoMouseLocation => "MOVE_NO_MOUSE_LOCATION",
            MoveError::Snapshot { .. } => "MOVE_SNAPSHOT_FAILED",
            MoveError::Input { .. } => "MOVE_INPUT_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            MoveError::NoMenuBarWindow { .. }
                | MoveError::ItemNotMovable { .. }
                | MoveError::ItemVanished { .. }
        )
    }
}
