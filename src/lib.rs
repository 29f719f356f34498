//! voicetask: a task tracker with time-based reminders, driven by free-form
//! typed or spoken commands.
//!
//! # Architecture
//!
//! - **Interpreter**: maps command text to an [`interpreter::Intent`]
//! - **Registry**: ordered task list ([`registry::TaskRegistry`])
//! - **Scheduler**: pending reminders and the poll loop that fires them
//!   ([`scheduler::ReminderScheduler`])
//! - **Store**: JSON persistence of tasks and reminders ([`store::StateStore`])
//! - **Context**: [`context::AppContext`] wires the above together for a
//!   front-end, which supplies a [`presentation::DateTimePrompt`] and drains
//!   [`scheduler::Notification`]s

pub mod app_dirs;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod presentation;
pub mod quote;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod store;

pub use config::TrackerConfig;
pub use context::{AppContext, CommandOutcome};
pub use error::{Result, TrackerError};
pub use interpreter::{Intent, interpret};
pub use state::AppState;
pub use store::StateStore;
