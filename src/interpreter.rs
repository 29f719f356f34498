//! Command interpretation.
//!
//! Maps a free-form command string to an [`Intent`] by substring matching.
//! Checks run in a fixed priority order and the first hit wins:
//!
//! | Contains | Intent |
//! |----------|--------|
//! | `"remind me to"` | [`Intent::SetReminder`] |
//! | `"add"` | [`Intent::AddTask`] |
//! | `"remove"` | [`Intent::RemoveTask`] |
//! | `"show"` | [`Intent::ShowTasks`] |
//!
//! Anything else is [`Intent::Unknown`]. Matching is deliberately naive:
//! `"remove paddle"` contains `"add"` and is therefore an add.

use crate::input::normalize_command;
use crate::registry::TaskRegistry;
use chrono::NaiveDateTime;
use tracing::{debug, warn};

const REMIND_PHRASE: &str = "remind me to";
const ADD_KEYWORD: &str = "add";
const REMOVE_KEYWORD: &str = "remove";
const SHOW_KEYWORD: &str = "show";

/// Accepted reminder time format (24-hour clock).
pub const REMINDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Classified meaning of a command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Append a task.
    AddTask {
        /// Task description.
        task: String,
    },
    /// Remove a task that is known to be in the registry.
    RemoveTask {
        /// Exact task description.
        task: String,
    },
    /// Re-render the task list.
    ShowTasks,
    /// Schedule a reminder; the due time is asked for separately.
    SetReminder {
        /// Reminder description, possibly empty.
        task: String,
    },
    /// Recognized command with nothing to do.
    NoOp(NoOpReason),
    /// No keyword matched.
    Unknown,
}

/// Why a recognized command produced no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// `add` without a description.
    EmptyTask,
    /// `remove` naming a task that is not in the registry.
    TaskNotFound,
}

/// Classify `text` against the current task list.
pub fn interpret(text: &str, tasks: &TaskRegistry) -> Intent {
    let command = normalize_command(text).unwrap_or_default();

    let intent = if let Some((_, rest)) = command.split_once(REMIND_PHRASE) {
        Intent::SetReminder {
            task: rest.trim().to_owned(),
        }
    } else if command.contains(ADD_KEYWORD) {
        let task = strip_first(&command, ADD_KEYWORD);
        if task.is_empty() {
            Intent::NoOp(NoOpReason::EmptyTask)
        } else {
            Intent::AddTask { task }
        }
    } else if command.contains(REMOVE_KEYWORD) {
        let task = strip_first(&command, REMOVE_KEYWORD);
        if tasks.contains(&task) {
            Intent::RemoveTask { task }
        } else {
            Intent::NoOp(NoOpReason::TaskNotFound)
        }
    } else if command.contains(SHOW_KEYWORD) {
        Intent::ShowTasks
    } else {
        Intent::Unknown
    };

    debug!(command = %command, ?intent, "interpreted command");
    intent
}

/// Remove the first occurrence of `keyword` and trim what is left.
fn strip_first(command: &str, keyword: &str) -> String {
    command.replacen(keyword, "", 1).trim().to_owned()
}

/// Parse a reminder time in exactly `YYYY-MM-DD HH:MM` form.
///
/// Returns `None` (and logs) on any other input.
pub fn parse_reminder_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    match NaiveDateTime::parse_from_str(input, REMINDER_TIME_FORMAT) {
        Ok(time) => Some(time),
        Err(e) => {
            warn!("invalid date and time format {input:?}: {e}");
            None
        }
    }
}
