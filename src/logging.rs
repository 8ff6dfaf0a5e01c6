//! Diagnostic logging to stderr.
//!
//! `LOCKVAULT_LOG` takes `EnvFilter` syntax (e.g. `lockvault=debug`) and
//! wins over the `-v` count when set.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOCKVAULT_LOG";

/// Default level for a given number of `-v` flags.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.  Calling it twice is harmless; the
/// second call leaves the first subscriber in place.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
