//! Reminder polling loop.
//!
//! Spawns a tokio task that wakes every poll interval, fires every reminder
//! whose time has come and removes it. Fired reminders are reported on an
//! unbounded channel so the loop never waits on the presentation side.

use crate::scheduler::reminders::{Notification, Reminder, now_local};
use crate::state::{self, SharedState};
use crate::store::StateStore;
use chrono::NaiveDateTime;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Interval between scheduler ticks (seconds).
const TICK_INTERVAL_SECS: u64 = 60;

/// Background scheduler owning the reminder side of the shared state.
///
/// Cloning yields another handle to the same reminders; the interactive side
/// keeps one to schedule reminders while [`ReminderScheduler::run`] consumes
/// another.
#[derive(Clone)]
pub struct ReminderScheduler {
    /// State shared with the interactive side.
    state: SharedState,
    /// Where to persist after each fire. `None` keeps state in memory only.
    store: Option<StateStore>,
    /// Channel for fired reminders.
    notify_tx: mpsc::UnboundedSender<Notification>,
    /// Time between ticks.
    poll_interval: Duration,
}

impl ReminderScheduler {
    /// Create a scheduler over `state` reporting on `notify_tx`.
    pub fn new(state: SharedState, notify_tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self {
            state,
            store: None,
            notify_tx,
            poll_interval: Duration::from_secs(TICK_INTERVAL_SECS),
        }
    }

    /// Persist the full state through `store` after every change.
    pub fn with_store(mut self, store: StateStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the poll interval (clamped to at least one millisecond).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Add a pending reminder and persist.
    pub fn schedule(&self, task: impl Into<String>, due: NaiveDateTime) -> Reminder {
        let reminder = Reminder::new(task, due);
        let mut guard = state::lock(&self.state);
        guard.reminders.push(reminder.clone());
        info!("reminder set for {}: {}", reminder.time, reminder.task);
        self.persist(&guard);
        reminder
    }

    /// Snapshot of pending reminders in insertion order.
    pub fn pending(&self) -> Vec<Reminder> {
        state::lock(&self.state).reminders.clone()
    }

    /// Run one poll tick against the local clock.
    pub fn tick(&self) -> usize {
        self.tick_at(now_local())
    }

    /// Fire every reminder due at `now`. Returns how many fired.
    ///
    /// Due reminders are split off in a single pass while the lock is held,
    /// so a reminder added concurrently is either seen whole by this tick or
    /// left for the next one, and no reminder fires twice.
    pub fn tick_at(&self, now: NaiveDateTime) -> usize {
        let mut guard = state::lock(&self.state);
        let (due, pending): (Vec<Reminder>, Vec<Reminder>) =
            std::mem::take(&mut guard.reminders)
                .into_iter()
                .partition(|r| r.is_due(now));
        guard.reminders = pending;

        if due.is_empty() {
            return 0;
        }

        let fired = due.len();
        for reminder in due {
            info!("reminder due at {} fired: {}", reminder.time, reminder.task);
            if self.notify_tx.send(Notification::from(reminder)).is_err() {
                debug!("notification channel closed, reminder dropped");
            }
        }

        self.persist(&guard);
        fired
    }

    /// Start the polling loop. The first tick runs immediately.
    ///
    /// The task runs until the runtime shuts down.
    pub fn run(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "reminder scheduler started with {} pending reminders, polling every {:?}",
                self.pending().len(),
                self.poll_interval
            );
            let mut interval = tokio::time::interval(self.poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let fired = self.tick();
                debug!("scheduler tick fired {fired} reminders");
            }
        })
    }

    /// Best-effort save; failures never undo an in-memory change.
    fn persist(&self, state: &crate::state::AppState) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(state) {
            error!("cannot persist reminders: {e}");
        }
    }
}
