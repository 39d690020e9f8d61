//! Logging initialization for the `nxt` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the `NXT_LOG`
//! environment variable. Falls back to the config file's `log.level` when the
//! variable is unset.
//!
//! # Usage
//!
//! ```bash
//! # Default (config level, info out of the box)
//! nxt board show
//!
//! # Debug level
//! NXT_LOG=debug nxt board show
//!
//! # Module-specific filtering
//! NXT_LOG=nexus_tab=debug,warn nxt board show
//! ```

use crate::config::schema::LogLevel;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads the `NXT_LOG` environment variable for filter directives, falling
/// back to `fallback` (the config file level) when the variable is unset or
/// invalid. Output is written to stderr so command results on stdout stay
/// machine-readable.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at startup).
pub fn init(fallback: LogLevel) {
    let filter = EnvFilter::try_from_env("NXT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(fallback.as_str()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
