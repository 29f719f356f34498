//! Combined durable model of tasks and reminders.

use crate::registry::TaskRegistry;
use crate::scheduler::Reminder;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything that is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Task list, touched only by the interactive side.
    pub tasks: TaskRegistry,
    /// Pending reminders, shared with the scheduler.
    pub reminders: Vec<Reminder>,
}

impl AppState {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.reminders.is_empty()
    }
}

/// State shared between the interactive side and the scheduler.
pub type SharedState = Arc<Mutex<AppState>>;

/// Wrap a state for sharing.
pub fn share(state: AppState) -> SharedState {
    Arc::new(Mutex::new(state))
}

/// Lock the shared state, recovering from a poisoned lock.
///
/// Every mutation is completed before the lock is released, so the data
/// behind a poisoned lock is still consistent.
pub fn lock(state: &SharedState) -> MutexGuard<'_, AppState> {
    state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
