//! Command-line interface for dynwall.
//!
//! Running `dynwall` with no subcommand starts the wallpaper daemon; the
//! subcommands render single frames and manage the configuration and cache.

mod commands;
mod output;

use clap::Parser;
pub use commands::curve::{CurveSample, sample_day};
pub use commands::render::{RenderArgs, Rendered, render};
pub use commands::{CacheCommands, Cli, Commands, ConfigCommands};

use crate::error::DynwallError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), DynwallError> {
    let cli = Cli::parse();
    cli.execute()
}
