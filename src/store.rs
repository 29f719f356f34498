//! JSON persistence for tasks and reminders.
//!
//! The state file is a single document:
//!
//! ```json
//! {
//!   "tasks": ["buy milk"],
//!   "reminders": [{ "task": "call mom", "time": "2025-06-01 18:30:00" }]
//! }
//! ```
//!
//! Loading never fails. A missing file is an empty state; a document that is
//! not JSON is an empty state plus a "corrupted store" warning; individual
//! fields that do not parse are treated as missing.

use crate::error::{Result, TrackerError};
use crate::registry::TaskRegistry;
use crate::scheduler::reminders::{format_stored_time, parse_stored_time};
use crate::scheduler::Reminder;
use crate::state::AppState;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What `load` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No state file yet.
    Missing,
    /// Parsed successfully (possibly with skipped fields).
    Loaded,
    /// The file exists but is not a usable document.
    Corrupted(String),
}

/// On-disk document layout.
#[derive(Debug, Serialize)]
struct StoredState {
    tasks: Vec<String>,
    reminders: Vec<StoredReminder>,
}

#[derive(Debug, Serialize)]
struct StoredReminder {
    task: String,
    time: String,
}

/// File-backed state store.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load state, degrading to empty on any problem.
    pub fn load(&self) -> AppState {
        self.load_with_status().0
    }

    /// Load state and report what was found.
    pub fn load_with_status(&self) -> (AppState, LoadStatus) {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no state file at {}", self.path.display());
                return (AppState::default(), LoadStatus::Missing);
            }
            Err(e) => {
                let reason = format!("cannot read state: {e}");
                warn!(
                    "{} is corrupted. Resetting tasks and reminders: {reason}",
                    self.path.display()
                );
                return (AppState::default(), LoadStatus::Corrupted(reason));
            }
        };

        match decode_state(&bytes) {
            Ok(state) => {
                debug!(
                    "loaded {} tasks and {} reminders from {}",
                    state.tasks.len(),
                    state.reminders.len(),
                    self.path.display()
                );
                (state, LoadStatus::Loaded)
            }
            Err(e) => {
                warn!(
                    "{} is corrupted. Resetting tasks and reminders: {e}",
                    self.path.display()
                );
                (AppState::default(), LoadStatus::Corrupted(e.to_string()))
            }
        }
    }

    /// Overwrite the state file with `state`.
    ///
    /// Writes a sibling temp file and renames it into place. This is best
    /// effort, not a transactional guarantee.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, state: &AppState) -> Result<()> {
        let json = encode_state(state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TrackerError::Storage(format!("cannot create state dir: {e}"))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| TrackerError::Storage(format!("cannot write state: {e}")))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| TrackerError::Storage(format!("cannot replace state: {e}")))?;

        debug!("saved state to {}", self.path.display());
        Ok(())
    }
}

/// Serialize `state` to the document form.
pub fn encode_state(state: &AppState) -> Result<String> {
    let stored = StoredState {
        tasks: state.tasks.list().to_vec(),
        reminders: state
            .reminders
            .iter()
            .map(|r| StoredReminder {
                task: r.task.clone(),
                time: format_stored_time(&r.time),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&stored)?)
}

/// Parse the document form, skipping fields that do not parse.
///
/// # Errors
///
/// Returns an error only when the bytes are not a JSON object.
pub fn decode_state(bytes: &[u8]) -> Result<AppState> {
    let document: Value = serde_json::from_slice(bytes)?;
    let Value::Object(fields) = document else {
        return Err(TrackerError::Storage(
            "state document is not a JSON object".to_owned(),
        ));
    };

    let tasks = match fields.get("tasks") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(task) => Some(task.clone()),
                other => {
                    warn!("skipping non-text task entry: {other}");
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!("ignoring malformed tasks field: {other}");
            Vec::new()
        }
        None => Vec::new(),
    };

    let reminders = match fields.get("reminders") {
        Some(Value::Array(items)) => items.iter().filter_map(decode_reminder).collect(),
        Some(other) => {
            warn!("ignoring malformed reminders field: {other}");
            Vec::new()
        }
        None => Vec::new(),
    };

    Ok(AppState {
        tasks: TaskRegistry::from(tasks),
        reminders,
    })
}

fn decode_reminder(item: &Value) -> Option<Reminder> {
    let task = item.get("task").and_then(Value::as_str);
    let time = item
        .get("time")
        .and_then(Value::as_str)
        .and_then(parse_stored_time);

    match (task, time) {
        (Some(task), Some(time)) => Some(Reminder::new(task, time)),
        _ => {
            warn!("skipping unreadable reminder entry: {item}");
            None
        }
    }
}
