//! TOML configuration schema types for nexus-tab.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial config file fills in the rest.
//!
//! Duration fields use human-readable strings (e.g. `"1h"`, `"500ms"`) parsed
//! by the `humantime` crate through the typed getters on [`Config`].

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [storage]
/// [widgets]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the dashboard data lives.
    pub storage: StorageConfig,
    /// Widget behavior knobs.
    pub widgets: WidgetsConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// The resolved dashboard data file path. An empty `storage.data_file`
    /// means the XDG data directory default; a leading `~` is expanded.
    pub fn data_file_path(&self) -> PathBuf {
        if self.storage.data_file.is_empty() {
            crate::config::xdg::data_path()
        } else {
            crate::config::xdg::expand_tilde(&self.storage.data_file)
        }
    }

    /// Quote cache lifetime, parsed from `widgets.quote_ttl`.
    pub fn quote_ttl(&self) -> Result<Duration, ConfigError> {
        parse_duration("widgets.quote_ttl", &self.widgets.quote_ttl)
    }

    /// Notes auto-save quiet interval, parsed from
    /// `widgets.notes_autosave_delay`.
    pub fn notes_autosave_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration(
            "widgets.notes_autosave_delay",
            &self.widgets.notes_autosave_delay,
        )
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Location of the persisted dashboard data.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file. Empty string means the XDG data directory
    /// default (`~/.local/share/nexus-tab/dashboard.json` on Linux).
    /// Tilde (~) is expanded to the user's home directory.
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Tunable widget behavior.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WidgetsConfig {
    /// How long a cached quote stays fresh (e.g. `"1h"`, `"30m"`).
    pub quote_ttl: String,
    /// Quiet interval before a notes edit is persisted (e.g. `"500ms"`).
    pub notes_autosave_delay: String,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            quote_ttl: "1h".to_string(),
            notes_autosave_delay: "500ms".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging settings for the `nxt` binary.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity. The `NXT_LOG` environment variable overrides this.
    pub level: LogLevel,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The value as a tracing directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
