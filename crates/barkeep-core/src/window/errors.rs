use crate::errors::BarkeepError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Failed to enumerate displays: {message}")]
    DisplayEnumerationFailed { message: String },

    #[error("Display not found: {id}")]
    DisplayNotFound { id: u32 },

    #[error("No displays available")]
    NoDisplays,

    #[error("Failed to capture window {window_id}: {message}")]
    CaptureFailed { window_id: u32, message: String },

    #[error("Window snapshots are not supported on this platform")]
    Unsupported,
}

impl BarkeepError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::EnumerationFailed { .. } => "WINDOW_ENUMERATION_FAILED",
            WindowError::DisplayEnumerationFailed { .. } => "DISPLAY_ENUMERATION_FAILED",
            WindowError::DisplayNotFound { .. } => "DISPLAY_NOT_FOUND",
            WindowError::NoDisplays => "NO_DISPLAYS",
            WindowError::CaptureFailed { .. } => "WINDOW_CAPTURE_FAILED",
            WindowError::Unsupported => "WINDOW_UNSUPPORTED_PLATFORM",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WindowError::DisplayNotFound { .. })
    }
}
