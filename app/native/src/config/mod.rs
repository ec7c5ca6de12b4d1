//! Configuration module for dynwall.
//!
//! This module provides configuration types, loading functionality, and the
//! template written on first run.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod template;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    AssetsConfig, ConfigError, DynwallConfig, OutputConfig, RefreshConfig, config_paths,
    load_config as load_config_default, load_config_from_path,
};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<DynwallConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` to take effect. Returns `false` if a
/// path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Loads the configuration from disk.
///
/// A custom path must exist and be valid. Without one, a missing file yields
/// the defaults and a template is written to the preferred location.
fn load_or_default() -> Result<DynwallConfig, ConfigError> {
    let result = CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path));

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            let _ = CONFIG_PATH.set(path);
            Ok(config)
        }
        Err(ConfigError::NotFound) => {
            create_default_config_file();
            Ok(DynwallConfig::default())
        }
        Err(err) => Err(err),
    }
}

/// Creates a template configuration file at the default location.
fn create_default_config_file() {
    let Some(config_path) = config_paths().into_iter().next() else {
        tracing::debug!("no config path available for creating template");
        return;
    };

    if config_path.exists() {
        return;
    }

    match template::create_config_file(&config_path) {
        Ok(()) => {
            tracing::info!(path = %config_path.display(), "created default configuration file");
        }
        Err(err) => {
            tracing::debug!(
                error = %err,
                path = %config_path.display(),
                "failed to create default configuration file"
            );
        }
    }
}

/// Initializes and returns the global configuration instance.
///
/// Idempotent: once loaded, later calls return the same instance.
///
/// # Errors
///
/// Returns the load error on the first call if a configuration file exists but
/// cannot be read, parsed, or validated.
pub fn init() -> Result<&'static DynwallConfig, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = load_or_default()?;
    Ok(CONFIG.get_or_init(|| config))
}

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

/// Directory relative asset paths are resolved against.
///
/// This is the directory of the loaded configuration file, else the preferred
/// configuration directory, else the current directory.
#[must_use]
pub fn base_dir() -> PathBuf {
    get_config_path()
        .and_then(|path| path.parent().map(PathBuf::from))
        .or_else(|| {
            config_paths().into_iter().next().and_then(|path| path.parent().map(PathBuf::from))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_types_are_available() {
        let config = DynwallConfig::default();
        assert_eq!(config.assets, AssetsConfig::default());
        assert_eq!(config.refresh, RefreshConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_base_dir_is_not_empty() {
        assert!(!base_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_config_error() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("No configuration file found"));
    }
}
