//! Cache directory utilities.
//!
//! Presented frames are written under the platform cache directory
//! (`~/.cache/{APP_BUNDLE_ID}` on Linux, `~/Library/Caches/{APP_BUNDLE_ID}` on
//! macOS), falling back to `/tmp/{APP_BUNDLE_ID}`.

use std::path::{Path, PathBuf};

use crate::constants::{APP_BUNDLE_ID, FRAMES_CACHE_DIR};

/// Returns the root cache directory for the application.
#[must_use]
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_BUNDLE_ID}")),
        |cache| cache.join(APP_BUNDLE_ID),
    )
}

/// Returns a subdirectory of the cache directory.
#[must_use]
pub fn get_cache_subdir(subdir: &str) -> PathBuf { get_cache_dir().join(subdir) }

/// Directory the desktop host writes presented frames to.
#[must_use]
pub fn get_frames_dir() -> PathBuf { get_cache_subdir(FRAMES_CACHE_DIR) }

/// Clears the entire cache directory.
///
/// Returns the approximate number of bytes freed; a missing directory frees 0.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or removed.
pub fn clear_cache() -> std::io::Result<u64> { clear_dir(&get_cache_dir()) }

/// Removes `dir` and everything below it, returning the bytes freed.
fn clear_dir(dir: &Path) -> std::io::Result<u64> {
    if !dir.exists() {
        return Ok(0);
    }

    let bytes_freed = calculate_dir_size(dir)?;
    std::fs::remove_dir_all(dir)?;
    tracing::debug!(path = %dir.display(), bytes_freed, "cleared cache directory");

    Ok(bytes_freed)
}

/// Sums the sizes of all files below `path`.
fn calculate_dir_size(path: &Path) -> std::io::Result<u64> {
    if !path.is_dir() {
        return Ok(0);
    }

    std::fs::read_dir(path)?.try_fold(0u64, |total, entry| {
        let entry = entry?;
        let size = if entry.file_type()?.is_dir() {
            calculate_dir_size(&entry.path())?
        } else {
            entry.metadata().map_or(0, |m| m.len())
        };
        Ok(total + size)
    })
}

/// Formats a byte count as a human-readable string, e.g. "1.50 MB".
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} bytes");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
