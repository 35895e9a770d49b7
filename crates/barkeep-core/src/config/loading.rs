//! Configuration loading.
//!
//! Configuration is resolved in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.barkeep/config.toml`
//!
//! Fields missing from the file keep their defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::types::BarkeepConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Path of the user configuration file.
pub fn user_config_path() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home_dir.join(".barkeep").join("config.toml"))
}

/// Load configuration from defaults and the user config file.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or validation fails.
/// A missing config file is not an error.
pub fn load_hierarchy() -> Result<BarkeepConfig, ConfigError> {
    load_hierarchy_from(&user_config_path()?)
}

/// Same as [`load_hierarchy`] with an explicit user config path.
pub fn load_hierarchy_from(path: &Path) -> Result<BarkeepConfig, ConfigError> {
    let config = match load_config_file(path) {
        Ok(config) => {
            info!(event = "core.config.loaded", path = %path.display());
            config
        }
        Err(ConfigError::ConfigNotFound { .. }) => {
            debug!(event = "core.config.using_defaults", path = %path.display());
            BarkeepConfig::default()
        }
        Err(e) => return Err(e),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Load a single configuration file without validating it.
pub fn load_config_file(path: &Path) -> Result<BarkeepConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TapLocation;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_hierarchy_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, BarkeepConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[relocation]
event_timeout_ms = 250
tap_location = "hid"
"#,
        )
        .unwrap();

        let config = load_hierarchy_from(&path).unwrap();
        assert_eq!(config.relocation.event_timeout_ms, 250);
        assert_eq!(config.relocation.drag_delay_ms, 25);
        assert_eq!(config.relocation.tap_location, TapLocation::Hid);
        assert!(!config.directory.on_screen_only);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[relocation\nevent_timeout_ms = ").unwrap();

        let err = load_hierarchy_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[relocation]\nevent_timeout_ms = 0\n").unwrap();

        let err = load_hierarchy_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_config_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigNotFound { .. }));
    }
}
