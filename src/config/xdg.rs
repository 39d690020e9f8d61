//! Platform-aware path resolution for nexus-tab.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/nexus-tab` or `~/.config/nexus-tab`
//! - Data: `$XDG_DATA_HOME/nexus-tab` or `~/.local/share/nexus-tab`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "nexus-tab";

/// Returns the configuration directory for nexus-tab.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/nexus-tab` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/nexus-tab`
///    - macOS: `~/Library/Application Support/nexus-tab`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support
        dirs::config_dir().expect("could not determine config directory")
    }
    #[cfg(not(target_os = "macos"))]
    {
        // ~/.config (XDG default on Linux)
        dirs::home_dir()
            .expect("could not determine home directory")
            .join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory for nexus-tab.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/nexus-tab` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.local/share/nexus-tab`
///    - macOS: `~/Library/Application Support/nexus-tab`
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

/// Platform-native data base directory (without XDG override).
fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().expect("could not determine data directory")
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::home_dir()
            .expect("could not determine home directory")
            .join(".local/share")
    }
}

/// Returns the path to the default dashboard data file.
///
/// Resolves to `data_dir()/dashboard.json`.
pub fn data_path() -> PathBuf {
    data_dir().join("dashboard.json")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().expect("could not determine home directory");
        home.join(rest)
    } else if path == "~" {
        dirs::home_dir().expect("could not determine home directory")
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}
