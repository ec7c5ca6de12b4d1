#![allow(clippy::multiple_crate_versions)]

//! dynwall - time-of-day reactive layered desktop wallpaper.
//!
//! This binary serves as both the wallpaper daemon and the CLI:
//! - When called with no arguments or with `run`: paints the wallpaper until Ctrl-C
//! - When called with other subcommands (e.g., `dynwall render`): runs them once

fn main() {
    if let Err(err) = dynwall_lib::run() {
        eprintln!("dynwall: {err}");
        std::process::exit(1);
    }
}
