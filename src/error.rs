//! Error types for the task tracker.

/// Top-level error type for the tracker core.
///
/// None of these are fatal to the process. Callers on the interactive path
/// log them and degrade (empty state, fallback quote, ignored transcript).
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Persisted state could not be read, parsed or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Speech capture or transcription error.
    #[error("speech error: {0}")]
    Speech(String),

    /// Network error talking to an external collaborator.
    #[error("network error: {0}")]
    Network(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TrackerError>;
