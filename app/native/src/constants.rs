//! Application-wide constants.

/// Application name, used for config and cache directory names.
pub const APP_NAME: &str = "dynwall";

/// Reverse-DNS identifier, used for the cache directory.
pub const APP_BUNDLE_ID: &str = "io.github.dynwall";

/// Default delay between two redraws, in milliseconds.
pub const DEFAULT_TICK_DELAY_MS: u64 = 5000;

/// Default output width of the desktop host, in pixels.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 2560;

/// Default output height of the desktop host, in pixels.
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1440;

/// Default JPEG quality of presented frames.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default file names of the three layer assets, in paint order.
pub const DEFAULT_BASE_ASSET: &str = "journey_base.png";
pub const DEFAULT_OVERLAY1_ASSET: &str = "journey_night_1.png";
pub const DEFAULT_OVERLAY2_ASSET: &str = "journey_night_2.png";

/// Cache subdirectory holding presented frames.
pub const FRAMES_CACHE_DIR: &str = "frames";

/// Environment variable read for the log filter before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "DYNWALL_LOG";
