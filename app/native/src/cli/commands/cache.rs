//! Cache CLI commands.
//!
//! The cache holds the frames written by the desktop host.

use clap::Subcommand;
use colored::Colorize;

use crate::cache;
use crate::error::DynwallError;

/// Cache subcommands for managing the application's cache.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum CacheCommands {
    /// Clear the application's cache directory.
    ///
    /// Removes every frame written by the wallpaper daemon. The next tick
    /// writes a fresh one.
    #[command(after_long_help = r#"Examples:
  dynwall cache clear   # Clear all cached frames"#)]
    Clear,

    /// Show the cache directory location.
    #[command(after_long_help = r#"Examples:
  dynwall cache path    # Print the cache directory path"#)]
    Path,
}

/// Execute cache subcommands.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be cleared.
pub fn execute(cmd: &CacheCommands) -> Result<(), DynwallError> {
    match cmd {
        CacheCommands::Clear => {
            let cache_dir = cache::get_cache_dir();
            if !cache_dir.exists() {
                println!("Cache directory does not exist. Nothing to clear.");
                return Ok(());
            }

            let bytes_freed = cache::clear_cache()
                .map_err(|err| DynwallError::CacheError(format!("Failed to clear cache: {err}")))?;
            println!(
                "{} Freed {}.",
                "Cache cleared.".green(),
                cache::format_bytes(bytes_freed).bold()
            );
        }
        CacheCommands::Path => println!("{}", cache::get_cache_dir().display()),
    }
    Ok(())
}
