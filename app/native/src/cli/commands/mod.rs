//! CLI command definitions using Clap.
//!
//! - `cache` - Cache management commands
//! - `config_cmd` - Configuration file commands
//! - `curve` - Opacity table
//! - `render` - One-shot frame rendering

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::constants::APP_NAME;
use crate::error::DynwallError;
use crate::{config, host, logging, schema};

pub mod cache;
pub mod config_cmd;
pub mod curve;
pub mod render;

pub use cache::CacheCommands;
pub use config_cmd::ConfigCommands;
pub use render::RenderArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// dynwall - A time-of-day reactive layered desktop wallpaper.
///
/// Running without a subcommand starts the wallpaper daemon.
#[derive(Parser, Debug)]
#[command(name = "dynwall")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Enable debug logging. `DYNWALL_LOG` takes precedence when set.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run the wallpaper daemon.
    ///
    /// Repaints the wallpaper every refresh interval and sets it as the desktop
    /// background until interrupted with Ctrl-C. This is the default command.
    Run,

    /// Render a single frame to a file.
    ///
    /// Composites the layers for the given hour without touching the desktop.
    #[command(after_long_help = r#"Examples:
  dynwall render -o now.png                # Current time, configured size
  dynwall render --hour 21.5 -o dusk.jpg   # Half past nine in the evening
  dynwall render --hour 3 --width 1920 --height 1080 -o night.png"#)]
    Render(RenderArgs),

    /// Print the opacity of each layer for every hour of the day.
    Curve {
        /// Output as JSON.
        #[arg(long, short)]
        json: bool,
    },

    /// Configuration file management commands.
    ///
    /// Initialize and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Cache management commands.
    ///
    /// Manage the directory rendered frames are written to.
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Output dynwall configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(dynwall completions --shell zsh)"
    ///   dynwall completions --shell fish > ~/.config/fish/completions/dynwall.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), DynwallError> {
        logging::init(self.verbose);

        if let Some(path) = self.config_path() {
            if !path.exists() {
                return Err(DynwallError::Config(config::ConfigError::Invalid(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))));
            }
            config::set_custom_config_path(path);
        }

        let Some(command) = &self.command else {
            return run_daemon();
        };

        match command {
            Commands::Run => run_daemon(),
            Commands::Render(args) => render::execute(args),
            Commands::Curve { json } => curve::execute(*json),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Cache(cmd) => cache::execute(cmd),
            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

/// Loads the configuration and runs the wallpaper daemon until Ctrl-C.
fn run_daemon() -> Result<(), DynwallError> {
    let config = config::init()?;
    let stats = host::run_desktop(config, &config::base_dir())?;
    tracing::debug!(ticks = stats.ticks, "daemon exited");
    Ok(())
}
