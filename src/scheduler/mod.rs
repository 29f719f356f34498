//! Reminder scheduling.
//!
//! Holds pending reminders and runs the background poll loop that fires each
//! one exactly once when its time arrives.

pub mod reminders;
pub mod runner;

pub use reminders::{Notification, Reminder};
pub use runner::ReminderScheduler;
