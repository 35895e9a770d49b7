//! Process lifecycle log events, emitted by the CLI around each command.

use tracing::{error, info, warn};

use crate::errors::BarkeepError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        os = std::env::consts::OS
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

/// Log a command failure under its stable error code.
///
/// User errors go out at WARN, everything else at ERROR.
pub fn log_app_error(error: &dyn BarkeepError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            user_error = true
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            user_error = false
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::window::WindowError;

    #[test]
    fn test_app_events() {
        log_app_startup();
        log_app_shutdown();

        log_app_error(&WindowError::DisplayNotFound { id: 9 });
        log_app_error(&ConfigError::NoHomeDirectory);
    }
}
