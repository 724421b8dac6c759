//! Logging initialization for the sysprober CLI.
//!
//! stdout is reserved for command payloads; all log output goes to stderr.
//! `SYSPROBER_LOG` overrides the verbosity-derived default filter.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for an explicit filter directive.
pub const LOG_ENV: &str = "SYSPROBER_LOG";

/// Initialize the logging subsystem.
///
/// Called once at startup; a second call is a no-op so tests can share a
/// process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
