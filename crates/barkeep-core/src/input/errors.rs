use super::types::MouseEventKind;
use crate::errors::BarkeepError;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to construct synthetic {kind} event")]
    EventConstructionFailure { kind: MouseEventKind },

    #[error("Failed to create event source")]
    EventSourceFailed,

    #[error("Failed to install event monitor: {message}")]
    MonitorInstallFailed { message: String },

    #[error("No confirmation for {kind} event within {timeout_ms}ms")]
    Timeout {
        kind: MouseEventKind,
        timeout_ms: u64,
    },

    #[error("Could not read the current mouse location")]
    NoMouseLocation,

    #[error("Cursor operation failed: {message}")]
    CursorFailed { message: String },

    #[error("Accessibility permission denied. Allow barkeep in System Settings > Privacy & Security > Accessibility")]
    AccessibilityPermissionDenied,

    #[error("Synthetic input is not supported on this platform")]
    Unsupported,
}

impl BarkeepError for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            InputError::EventConstructionFailure { .. } => "INPUT_EVENT_CONSTRUCTION_FAILED",
            InputError::EventSourceFailed => "INPUT_EVENT_SOURCE_FAILED",
            InputError::MonitorInstallFailed { .. } => "INPUT_MONITOR_INSTALL_FAILED",
            InputError::Timeout { .. } => "INPUT_TIMEOUT",
            InputError::NoMouseLocation => "INPUT_NO_MOUSE_LOCATION",
            InputError::CursorFailed { .. } => "INPUT_CURSOR_FAILED",
            InputError::AccessibilityPermissionDenied => "INPUT_ACCESSIBILITY_DENIED",
            InputError::Unsupported => "INPUT_UNSUPPORTED_PLATFORM",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, InputError::AccessibilityPermissionDenied)
    }
}
