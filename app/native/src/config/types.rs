//! Configuration types for dynwall.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! Every field is optional; a missing file or an empty object yields the
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    APP_NAME, DEFAULT_BASE_ASSET, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_HEIGHT,
    DEFAULT_OUTPUT_WIDTH, DEFAULT_OVERLAY1_ASSET, DEFAULT_OVERLAY2_ASSET, DEFAULT_TICK_DELAY_MS,
};
use crate::opacity::LAYER_COUNT;
use crate::platform::path::expand_and_resolve;

/// Location of the three layer images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetsConfig {
    /// Directory holding the layer images.
    /// `~` is expanded; relative paths are resolved against the directory of
    /// the configuration file.
    /// Default: "assets"
    pub path: String,

    /// File name of the base layer, painted fully opaque.
    /// Default: "journey_base.png"
    pub base: String,

    /// File name of the first night overlay.
    /// Default: "journey_night_1.png"
    pub overlay1: String,

    /// File name of the second night overlay.
    /// Default: "journey_night_2.png"
    pub overlay2: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            path: "assets".to_string(),
            base: DEFAULT_BASE_ASSET.to_string(),
            overlay1: DEFAULT_OVERLAY1_ASSET.to_string(),
            overlay2: DEFAULT_OVERLAY2_ASSET.to_string(),
        }
    }
}

impl AssetsConfig {
    /// File names of the layers, in paint order.
    #[must_use]
    pub fn file_names(&self) -> [&str; LAYER_COUNT] {
        [self.base.as_str(), self.overlay1.as_str(), self.overlay2.as_str()]
    }

    /// Resolves the asset directory against `base_dir`.
    #[must_use]
    pub fn directory(&self, base_dir: &Path) -> PathBuf { expand_and_resolve(&self.path, base_dir) }

    /// Full paths of the layer images, in paint order.
    #[must_use]
    pub fn resolve(&self, base_dir: &Path) -> [PathBuf; LAYER_COUNT] {
        let directory = self.directory(base_dir);
        self.file_names().map(|name| directory.join(name))
    }
}

/// Redraw timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshConfig {
    /// Delay between two redraws in milliseconds. Must be greater than 0.
    /// Default: 5000
    pub interval_ms: u64,

    /// Read the clock with minute precision (`hour + minute / 60`) instead of
    /// whole hours.
    /// Default: false
    pub fractional_hours: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TICK_DELAY_MS,
            fractional_hours: false,
        }
    }
}

impl RefreshConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration { Duration::from_millis(self.interval_ms) }
}

/// Output of the desktop host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    /// Width of the rendered frame in pixels.
    /// Default: 2560
    pub width: u32,

    /// Height of the rendered frame in pixels.
    /// Default: 1440
    pub height: u32,

    /// Hand every frame to the operating system as the desktop wallpaper.
    /// When false, frames are only written to the cache directory.
    /// Default: true
    pub set_desktop: bool,

    /// JPEG quality of presented frames (1-100).
    /// Default: 90
    pub quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            set_desktop: true,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Root configuration structure for dynwall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DynwallConfig {
    /// Layer images.
    pub assets: AssetsConfig,

    /// Redraw timing.
    pub refresh: RefreshConfig,

    /// Desktop output.
    pub output: OutputConfig,
}

impl DynwallConfig {
    /// Checks values serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_ms == 0 {
            return Err(ConfigError::Invalid("refresh.intervalMs must be greater than 0".to_string()));
        }
        if self.output.width == 0 || self.output.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "output size must be non-zero (got {}x{})",
                self.output.width, self.output.height
            )));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Invalid(format!(
                "output.quality must be between 1 and 100 (got {})",
                self.output.quality
            )));
        }
        for (field, name) in ["assets.base", "assets.overlay1", "assets.overlay2"]
            .into_iter()
            .zip(self.assets.file_names())
        {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/dynwall/config.jsonc or config.json"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The configuration parsed but holds an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/dynwall/` if the variable is set
/// 2. `~/.config/dynwall/`
/// 3. The platform config directory (`~/Library/Application Support/dynwall/` on macOS)
///
/// Each directory is checked for `config.jsonc`, then `config.json`.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut search_dirs = Vec::new();

    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        search_dirs.push(PathBuf::from(xdg_config).join(APP_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        search_dirs.push(home.join(".config").join(APP_NAME));
    }
    if let Some(config_dir) = dirs::config_dir() {
        search_dirs.push(config_dir.join(APP_NAME));
    }

    let mut paths = Vec::new();
    for dir in search_dirs {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config itself
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the
/// expected locations, or any error of [`load_config_from_path`] for the first
/// file found.
pub fn load_config() -> Result<(DynwallConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

/// Loads and validates the configuration file at `path`.
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the file cannot be read,
/// `ConfigError::ParseError` if it contains invalid JSON, or
/// `ConfigError::Invalid` if a value is out of range.
pub fn load_config_from_path(path: &Path) -> Result<(DynwallConfig, PathBuf), ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: DynwallConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok((config, path.to_path_buf()))
}
