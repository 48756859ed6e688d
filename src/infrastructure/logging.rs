//! Logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "TRK_LOG";

/// Filter directive for the number of `-v` flags given
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialise the global `tracing` subscriber writing to stderr.
///
/// `TRK_LOG` takes precedence over the verbosity flag when it holds a valid
/// filter.
pub fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    let layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
}
