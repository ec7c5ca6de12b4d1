//! Tracing subscriber setup.
//!
//! The filter is read from `DYNWALL_LOG`, then `RUST_LOG`. Without either, the
//! library logs at `info` (or `debug` with `--verbose`).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::constants::LOG_ENV_VAR;

/// Default filter directive when no environment filter is set.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "dynwall_lib=debug,dynwall=debug" } else { "dynwall_lib=info,dynwall=info" }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global subscriber, writing to stderr.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let result = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    if result.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert!(default_directive(false).contains("dynwall_lib=info"));
        assert!(default_directive(true).contains("dynwall_lib=debug"));
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
