//! Centralized path management for the contamscan CLI
//!
//! This module provides utilities for consistently locating the
//! configuration directory and file.

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "contamscan";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the path to the configuration directory
///
/// `XDG_CONFIG_HOME` wins when set (Linux/macOS). Otherwise:
/// - Linux: `~/.config/contamscan`
/// - macOS: `~/Library/Application Support/contamscan`
/// - Windows: `%APPDATA%/contamscan`
///
/// If the standard directories cannot be determined, falls back to
/// `.contamscan` in the current directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".contamscan"))
}

/// Returns the path to the default configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
