//! Centralized application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/voicetask/` | `~/.local/share/voicetask/` |
//! | Config | `~/Library/Application Support/voicetask/` | `~/.config/voicetask/` |
//!
//! # Environment Overrides
//!
//! - `VOICETASK_DATA_DIR` overrides [`data_dir`]
//! - `VOICETASK_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the persisted task/reminder state and log files.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("VOICETASK_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("voicetask"))
        .unwrap_or_else(|| PathBuf::from("/tmp/voicetask-data"))
}

/// Application config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("VOICETASK_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("voicetask"))
        .unwrap_or_else(|| PathBuf::from("/tmp/voicetask-config"))
}

/// Log file directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Persisted task and reminder state (`data_dir()/tasks.json`).
#[must_use]
pub fn state_file() -> PathBuf {
    data_dir().join("tasks.json")
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
