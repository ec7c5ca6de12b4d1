//! dynwall - A time-of-day reactive layered desktop wallpaper.
//!
//! Three stacked images are alpha-blended with opacities that follow the hour
//! of day: a fully opaque base and two night overlays that fade in after dusk.
//! The library provides the opacity curve, the compositor loop, the desktop
//! host that drives it, and the command-line interface.

// Core modules
pub mod compositor;
pub mod opacity;

// Host and CLI
pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod logging;
pub mod platform;
pub mod schema;

pub use error::DynwallError;

/// Parses the command line and runs the requested command.
///
/// With no subcommand this starts the wallpaper daemon.
///
/// # Errors
///
/// Returns the error of the command that ran.
pub fn run() -> Result<(), DynwallError> { cli::run() }
