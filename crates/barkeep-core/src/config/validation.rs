//! Configuration validation logic.

use crate::config::types::BarkeepConfig;
use crate::errors::ConfigError;

/// Upper bound for the per-event confirmation timeout.
pub const MAX_EVENT_TIMEOUT_MS: u64 = 10_000;

/// Upper bound for the pause between mouse-down and mouse-up.
pub const MAX_DRAG_DELAY_MS: u64 = 5_000;

/// Validate a BarkeepConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `relocation.event_timeout_ms` must be in `1..=10000`
/// - `relocation.drag_delay_ms` must be at most 5000
pub fn validate_config(config: &BarkeepConfig) -> Result<(), ConfigError> {
    let relocation = &config.relocation;

    if relocation.event_timeout_ms == 0 || relocation.event_timeout_ms > MAX_EVENT_TIMEOUT_MS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "relocation.event_timeout_ms must be between 1 and {}, got {}",
                MAX_EVENT_TIMEOUT_MS, relocation.event_timeout_ms
            ),
        });
    }

    if relocation.drag_delay_ms > MAX_DRAG_DELAY_MS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "relocation.drag_delay_ms must be at most {}, got {}",
                MAX_DRAG_DELAY_MS, relocation.drag_delay_ms
            ),
        });
    }

    Ok(())
}
