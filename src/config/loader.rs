//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from a specific path or the default XDG location.
//! When the default location has no file, returns `Config::default()`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific path.
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or
    /// `ConfigError::ReadError` for other I/O failures.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::parse_toml(&content, path)
    }

    /// Load configuration from the default XDG location.
    ///
    /// If no file exists at the default path, returns `Config::default()`
    /// instead of an error.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Parse a TOML string into `Config` with position-aware error reporting.
    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| {
                    let line = content[..span.start].matches('\n').count() + 1;
                    let last_newline = content[..span.start]
                        .rfind('\n')
                        .map(|p| p + 1)
                        .unwrap_or(0);
                    let column = span.start - last_newline + 1;
                    (line, column)
                })
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogLevel;
    use serial_test::serial;
    use std::path::PathBuf;

    /// Run a closure with `XDG_CONFIG_HOME` temporarily set, then restore.
    fn with_xdg_config<F: FnOnce()>(value: &str, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", value);
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    #[test]
    fn parse_valid_full_config() {
        let toml_str = r#"
[storage]
data_file = "~/dash/data.json"

[widgets]
quote_ttl = "30m"
notes_autosave_delay = "250ms"

[log]
level = "debug"
"#;
        let path = PathBuf::from("test.toml");
        let config = ConfigLoader::parse_toml(toml_str, &path).expect("valid TOML should parse");
        assert_eq!(config.widgets.quote_ttl, "30m");
        assert_eq!(config.log.level, LogLevel::Debug);
    }

    #[test]
    fn parse_error_reports_line_and_column() {
        let toml_str = "[log]\nlevel = \"verbose\"\n";
        let path = PathBuf::from("bad.toml");
        let err = ConfigLoader::parse_toml(toml_str, &path).unwrap_err();
        match err {
            ConfigError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn load_from_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            ConfigLoader::load_from_path(&path),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[widgets]\nquote_ttl = \"2h\"\n").unwrap();

        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.widgets.quote_ttl, "2h");
    }

    #[test]
    #[serial]
    fn load_default_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        with_xdg_config(dir.path().to_str().unwrap(), || {
            let config = ConfigLoader::load_default().unwrap();
            assert_eq!(config, Config::default());
        });
    }

    #[test]
    #[serial]
    fn load_default_picks_up_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("nexus-tab");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), "[log]\nlevel = \"trace\"\n").unwrap();

        with_xdg_config(dir.path().to_str().unwrap(), || {
            let config = ConfigLoader::load_default().unwrap();
            assert_eq!(config.log.level, LogLevel::Trace);
        });
    }
}
