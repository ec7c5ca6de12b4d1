//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
///
/// The template parses to the default configuration as-is.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// dynwall Configuration File
// ==========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // ============================================================================
  // Layer Images
  // ============================================================================
  // Three images painted over a black background: the base image fully opaque,
  // then two night overlays whose opacity follows the time of day.
  // "assets": {
  //   // Directory holding the images. "~" is expanded; relative paths are
  //   // resolved against the directory of this file.
  //   "path": "assets",
  //
  //   // Base layer, always fully opaque
  //   "base": "journey_base.png",
  //
  //   // First night overlay
  //   "overlay1": "journey_night_1.png",
  //
  //   // Second night overlay
  //   "overlay2": "journey_night_2.png"
  // },

  // ============================================================================
  // Refresh
  // ============================================================================
  // "refresh": {
  //   // Delay between two redraws in milliseconds (must be > 0)
  //   "intervalMs": 5000,
  //
  //   // Read the clock with minute precision instead of whole hours
  //   "fractionalHours": false
  // },

  // ============================================================================
  // Desktop Output
  // ============================================================================
  // "output": {
  //   // Size of the rendered frame in pixels
  //   "width": 2560,
  //   "height": 1440,
  //
  //   // Set every frame as the desktop wallpaper. When false, frames are only
  //   // written to the cache directory.
  //   "setDesktop": true,
  //
  //   // JPEG quality of presented frames (1-100)
  //   "quality": 90
  // }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::{DynwallConfig, load_config_from_path};

    #[test]
    fn test_generate_config_template_contains_all_sections() {
        let template = generate_config_template();
        assert!(template.contains("//"));
        assert!(template.contains("\"assets\""));
        assert!(template.contains("\"refresh\""));
        assert!(template.contains("\"output\""));
        assert!(template.contains("intervalMs"));
        assert!(template.contains("journey_night_2.png"));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");
        create_config_file(&path).unwrap();

        let (config, _) = load_config_from_path(&path).unwrap();
        assert_eq!(config, DynwallConfig::default());
    }

    #[test]
    fn test_uncommented_template_values_match_defaults() {
        // Uncommenting every option line must still yield the defaults.
        let template = generate_config_template();
        let uncommented = template
            .lines()
            .map(|line| match line.trim_start().strip_prefix("//").map(str::trim_start) {
                Some(rest) if rest.starts_with('"') || rest.starts_with('}') => rest,
                _ => line,
            })
            .collect::<Vec<_>>()
            .join("\n");

        let stripped = json_comments::StripComments::new(uncommented.as_bytes());
        let config: DynwallConfig = serde_json::from_reader(stripped).unwrap();
        assert_eq!(config, DynwallConfig::default());
    }
}
