//! Configuration types for the task tracker.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Default reminder poll interval in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Quote shown when the quote service cannot be reached.
pub const DEFAULT_QUOTE: &str = "Stay positive and work hard!";

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Persisted state location.
    pub storage: StorageConfig,
    /// Reminder polling settings.
    pub scheduler: SchedulerConfig,
    /// Quote-of-the-day settings.
    pub quote: QuoteConfig,
    /// External transcription settings.
    pub speech: SpeechConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Where tasks and reminders are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// State file path (None = `app_dirs::state_file()`).
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved state file path.
    pub fn state_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(crate::app_dirs::state_file)
    }
}

/// Reminder scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between poll ticks.
    pub poll_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl SchedulerConfig {
    /// Poll interval as a [`Duration`], never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Quote-of-the-day collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Whether to fetch a quote at startup.
    pub enabled: bool,
    /// Endpoint returning a JSON object with a `content` field.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Text used when the fetch fails for any reason.
    pub fallback: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://api.quotable.io/random".to_owned(),
            timeout_secs: 5,
            fallback: DEFAULT_QUOTE.to_owned(),
        }
    }
}

/// External speech transcription configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Program and arguments that record audio and print the transcript to
    /// stdout. `None` disables voice input.
    pub command: Option<Vec<String>>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Also write daily rolling log files under `app_dirs::logs_dir()`.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "voicetask=info".to_owned(),
            file: false,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::TrackerError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TrackerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::app_dirs::config_file()
    }

    /// Load `path`, falling back to defaults.
    ///
    /// A missing file is silent; a malformed one is logged and ignored.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring config at {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
