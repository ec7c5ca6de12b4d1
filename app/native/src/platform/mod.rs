//! Platform helpers shared by the CLI and the desktop host.
//!
//! - [`path`] - Shell-like path expansion

pub mod path;

pub use path::{expand, expand_and_resolve};
