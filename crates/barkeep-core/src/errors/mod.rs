//! Error plumbing shared by every module.
//!
//! Each domain keeps its own error enum next to its code (`window::errors`,
//! `input::errors`, `relocation::errors`); this module holds the trait they
//! all implement and the configuration errors, which have no other home.

use std::error::Error;

/// Implemented by every error barkeep reports.
///
/// `error_code` is stable across releases and shows up as the `error_code`
/// field of `core.app.error_occurred` log events.
pub trait BarkeepError: Error + Send + Sync + 'static {
    fn error_code(&self) -> &'static str;

    /// Caused by input the user can fix (a bad item key, an unknown display,
    /// a malformed config file). Logged as a warning instead of an error.
    fn is_user_error(&self) -> bool {
        false
    }
}

pub type BarkeepResult<T> = Result<T, Box<dyn BarkeepError>>;

/// Box a domain error, for `map_err` into [`BarkeepResult`].
pub fn boxed<E: BarkeepError>(error: E) -> Box<dyn BarkeepError> {
    Box::new(error)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl BarkeepError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::NoHomeDirectory => "CONFIG_NO_HOME_DIRECTORY",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}
