//! Shell-like path expansion for paths read from the configuration file.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
///
/// Absolute and relative paths are otherwise returned unchanged. Surrounding
/// whitespace is trimmed and an empty input yields an empty path.
///
/// ```ignore
/// use dynwall_lib::platform::path::expand;
///
/// let assets = expand("~/.config/dynwall/assets");
/// assert!(!assets.to_string_lossy().starts_with('~'));
/// ```
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return PathBuf::new();
    }
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands `path` and resolves it against `base_dir` if it is still relative.
///
/// Used to resolve the asset directory relative to the directory holding the
/// configuration file.
///
/// ```ignore
/// use std::path::Path;
/// use dynwall_lib::platform::path::expand_and_resolve;
///
/// let resolved = expand_and_resolve("assets", Path::new("/home/me/.config/dynwall"));
/// assert_eq!(resolved, Path::new("/home/me/.config/dynwall/assets"));
/// ```
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);
    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }
    base_dir.join(expanded)
}
