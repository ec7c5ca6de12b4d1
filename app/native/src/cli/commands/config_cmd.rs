//! Config CLI commands.
//!
//! Commands for managing the dynwall configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::config::config_paths;
use crate::config::template::{create_config_file, generate_config_template};
use crate::error::DynwallError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a new configuration file at the default location with all
    /// available options commented out.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  dynwall config init              # Create config at default location
  dynwall config init --force      # Overwrite existing config
  dynwall config init --path ~/my-config.jsonc  # Create at custom path
  dynwall config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses ~/.config/dynwall/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the path to the configuration file.
    ///
    /// Displays the paths where dynwall looks for configuration files and
    /// marks the one in use.
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be written.
pub fn execute(cmd: &ConfigCommands) -> Result<(), DynwallError> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => {
            let config_path = path.clone().unwrap_or_else(|| {
                config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
            });
            init_config(&config_path, *force)?;

            println!("{} {}", "Configuration file created at:".green(), config_path.display());
            println!("\nAll options are commented out by default.");
            println!("Edit the file and uncomment the options you want to configure.");
            Ok(())
        }
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
    }
}

/// Writes the configuration template to `config_path`.
fn init_config(config_path: &Path, force: bool) -> Result<(), DynwallError> {
    if config_path.exists() && !force {
        return Err(DynwallError::CommandError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(config_path).map_err(|e| {
        DynwallError::CommandError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })
}

/// Labels each search path: the first existing one is active.
fn label_paths(paths: &[PathBuf]) -> Vec<(&Path, &'static str)> {
    let mut found_config = false;
    paths
        .iter()
        .map(|path| {
            let marker = match (path.exists(), found_config) {
                (true, false) => {
                    found_config = true;
                    " (active)"
                }
                (true, true) => " (exists)",
                (false, _) => "",
            };
            (path.as_path(), marker)
        })
        .collect()
}

fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    let paths = config_paths();
    let labeled = label_paths(&paths);
    for (i, (path, marker)) in labeled.iter().enumerate() {
        println!("  {}. {}{}", i + 1, path.display(), marker.green());
    }

    if labeled.iter().all(|(_, marker)| marker.is_empty()) {
        println!("\nNo configuration file found. Defaults are in use.");
        println!("Run 'dynwall config init' to create one.");
    }
}
