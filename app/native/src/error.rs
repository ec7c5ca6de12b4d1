//! Error types for dynwall.
//!
//! Each module owns a narrow error enum; this module folds them into the single
//! error type returned by CLI commands.

use thiserror::Error;

use crate::compositor::AssetError;
use crate::config::ConfigError;
use crate::host::PresentError;
use crate::opacity::CurveError;

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum DynwallError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// A keyframe table is malformed.
    #[error(transparent)]
    Curve(#[from] CurveError),
    /// A layer asset is missing or cannot be decoded.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A frame could not be written or handed to the desktop.
    #[error("Wallpaper error: {0}")]
    Present(#[from] PresentError),
    /// Cache operation failed.
    #[error("Cache error: {0}")]
    CacheError(String),
    /// The async runtime could not be started.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for DynwallError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for DynwallError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<String> for DynwallError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for DynwallError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::opacity::Layer;

    #[test]
    fn test_invalid_arguments_display() {
        let err = DynwallError::InvalidArguments("--hour must be in [0, 24)".to_string());
        assert_eq!(err.to_string(), "--hour must be in [0, 24)");
    }

    #[test]
    fn test_curve_error_is_transparent() {
        let err: DynwallError = CurveError::InvalidCurveConfiguration("too short".to_string()).into();
        assert_eq!(err.to_string(), "Invalid curve configuration: too short");
    }

    #[test]
    fn test_asset_error_is_transparent() {
        let err: DynwallError = AssetError::Missing {
            layer: Layer::Base,
            path: "/tmp/journey_base.png".to_string(),
        }
        .into();
        assert!(matches!(err, DynwallError::Asset(_)));
        assert!(err.to_string().contains("Missing base layer asset"));
    }

    #[test]
    fn test_config_error_display() {
        let err: DynwallError = ConfigError::Invalid("refresh.intervalMs must be > 0".to_string()).into();
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("intervalMs"));
    }

    #[test]
    fn test_present_error_display() {
        let err: DynwallError = PresentError::SetWallpaper {
            path: PathBuf::from("/tmp/frame-a.jpg"),
            message: "no desktop environment".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("Wallpaper error"));
        assert!(msg.contains("no desktop environment"));
    }

    #[test]
    fn test_cache_error_display() {
        let err = DynwallError::CacheError("Failed to remove directory".to_string());
        assert!(err.to_string().contains("Cache error"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: DynwallError = io_err.into();
        assert!(matches!(err, DynwallError::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_from_string() {
        let err: DynwallError = "test error".into();
        assert!(matches!(err, DynwallError::CommandError(_)));
        assert_eq!(err.to_string(), "test error");
    }
}
