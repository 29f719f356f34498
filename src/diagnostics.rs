//! Logging bootstrap.
//!
//! Installs a `tracing` subscriber writing to stderr, plus an optional daily
//! rolling log file under [`crate::app_dirs::logs_dir`]. stdout is left to
//! the terminal front-end.

use crate::config::LoggingConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log file name prefix inside the logs directory.
const LOG_FILE_PREFIX: &str = "voicetask";

/// Build the filter: `RUST_LOG` wins, otherwise the configured directive.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialise global logging.
///
/// Returns the file writer guard when file logging is enabled; drop it only
/// at process exit or buffered lines are lost. Never panics: a failure to
/// open the log directory falls back to stderr-only logging.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = if config.file {
        match open_rolling_appender(&crate::app_dirs::logs_dir()) {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("voicetask: file logging disabled: {e}");
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let installed = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    if let Err(e) = installed {
        eprintln!("voicetask: logging already initialised: {e}");
    }

    guard
}

fn open_rolling_appender(dir: &Path) -> crate::Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(|e| crate::TrackerError::Config(format!("cannot open log file: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn rolling_appender_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let appender = open_rolling_appender(&logs);
        assert!(appender.is_ok());
        assert!(logs.is_dir());
    }

    #[test]
    fn invalid_directive_does_not_panic() {
        let config = LoggingConfig {
            level: "not a [valid directive".to_owned(),
            file: false,
        };
        let _ = build_filter(&config);
    }
}
