//! Reminder and notification types.
//!
//! A [`Reminder`] is either pending (present in the collection) or fired
//! (removed). There is no re-arming or editing after creation.

use chrono::{Local, NaiveDateTime};

/// Timestamp forms accepted when reading a persisted reminder time.
///
/// The first entry is what [`NaiveDateTime`]'s `Display` writes.
const STORED_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A one-shot reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// What to remind about.
    pub task: String,
    /// Local wall-clock time the reminder becomes due.
    pub time: NaiveDateTime,
}

impl Reminder {
    pub fn new(task: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            task: task.into(),
            time,
        }
    }

    /// Returns `true` once `now` has reached the due time.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.time <= now
    }
}

/// Emitted exactly once when a reminder fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The reminder description.
    pub task: String,
    /// When the reminder was due (it may fire later after missed polls).
    pub due: NaiveDateTime,
}

impl Notification {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        format!("Reminder: {}", self.task)
    }
}

impl From<Reminder> for Notification {
    fn from(reminder: Reminder) -> Self {
        Self {
            task: reminder.task,
            due: reminder.time,
        }
    }
}

/// Current local wall-clock time.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Textual form written to the state file.
pub fn format_stored_time(time: &NaiveDateTime) -> String {
    time.to_string()
}

/// Parse any textual form the store may have written.
pub fn parse_stored_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    STORED_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
