//! Configuration error types for loading and parsing TOML config files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("Invalid configuration at {path}:{line}:{column}: {message}")]
    ParseError {
        /// Path to the file containing the error.
        path: PathBuf,
        /// One-based line index of the error (0 if unknown).
        line: usize,
        /// One-based column index of the error (0 if unknown).
        column: usize,
        /// Human-readable description of the parse failure.
        message: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    NotFound {
        /// Path that was requested but does not exist.
        path: PathBuf,
    },

    /// A configuration file already exists at the target path.
    #[error("Configuration file already exists: {path}")]
    AlreadyExists {
        /// Path where the file already exists.
        path: PathBuf,
    },

    /// Failed to write a configuration file to disk.
    #[error("Failed to write configuration file: {path}")]
    WriteError {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A duration field holds a string humantime cannot parse.
    #[error("Invalid duration for '{field}': {value:?} ({message})")]
    InvalidDuration {
        /// Config field with the bad value.
        field: &'static str,
        /// The offending string.
        value: String,
        /// Parser's description of the problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error_includes_position() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("/home/user/.config/nexus-tab/config.toml"),
            line: 12,
            column: 3,
            message: "unknown variant `verbose`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("config.toml:12:3"));
        assert!(msg.contains("unknown variant"));
    }

    #[test]
    fn display_invalid_duration_names_the_field() {
        let err = ConfigError::InvalidDuration {
            field: "widgets.quote_ttl",
            value: "one hour".to_string(),
            message: "expected a duration".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("widgets.quote_ttl"));
        assert!(msg.contains("one hour"));
    }

    #[test]
    fn read_error_preserves_source() {
        use std::error::Error as _;
        let err = ConfigError::ReadError {
            path: PathBuf::from("config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
