//! Application context.
//!
//! [`AppContext`] ties the interpreter, the task registry, the reminder
//! scheduler and the store together. It is passed explicitly to whatever
//! front-end drives it; there is no global state.
//!
//! Every command runs to completion (interpret, mutate, persist) before the
//! next one. The shared state lock is taken only for the mutate-and-persist
//! step and never held while waiting on the user.

use crate::input::normalize_command;
use crate::interpreter::{self, Intent, NoOpReason};
use crate::presentation::DateTimePrompt;
use crate::scheduler::{Notification, Reminder, ReminderScheduler};
use crate::state::{self, AppState, SharedState};
use crate::store::{LoadStatus, StateStore};
use chrono::NaiveDateTime;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

/// What a processed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A task was appended.
    TaskAdded(String),
    /// A task was removed.
    TaskRemoved(String),
    /// The task list should be shown.
    ShowTasks(Vec<String>),
    /// A reminder is pending.
    ReminderSet(Reminder),
    /// The time prompt was cancelled or unparseable.
    ReminderDiscarded,
    /// Nothing to do.
    Ignored,
}

impl CommandOutcome {
    /// Whether the task list display is stale after this outcome.
    pub fn needs_render(&self) -> bool {
        matches!(
            self,
            Self::TaskAdded(_) | Self::TaskRemoved(_) | Self::ShowTasks(_)
        )
    }
}

/// Explicit application context.
pub struct AppContext {
    state: SharedState,
    store: StateStore,
    scheduler: ReminderScheduler,
}

impl AppContext {
    /// Load state from `store` and build a context around it.
    ///
    /// Returns the receiving end of the reminder notification channel.
    pub fn open(store: StateStore) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (state, status) = store.load_with_status();
        match &status {
            LoadStatus::Missing => info!("starting with an empty task list"),
            LoadStatus::Loaded => info!(
                "loaded {} tasks and {} reminders",
                state.tasks.len(),
                state.reminders.len()
            ),
            LoadStatus::Corrupted(_) => info!("state was reset to empty"),
        }
        Self::from_state(state, store)
    }

    /// Build a context around an already loaded state.
    pub fn from_state(
        state: AppState,
        store: StateStore,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let state = state::share(state);
        let scheduler = ReminderScheduler::new(state.clone(), notify_tx).with_store(store.clone());
        (
            Self {
                state,
                store,
                scheduler,
            },
            notify_rx,
        )
    }

    /// Override the scheduler poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.scheduler = self.scheduler.with_poll_interval(interval);
        self
    }

    /// Snapshot of tasks.
    pub fn tasks(&self) -> Vec<String> {
        state::lock(&self.state).tasks.list().to_vec()
    }

    /// Snapshot of pending reminders.
    pub fn reminders(&self) -> Vec<Reminder> {
        self.scheduler.pending()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Handle to the scheduler sharing this context's state.
    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Start the reminder poll loop on the current runtime.
    pub fn spawn_scheduler(&self) -> tokio::task::JoinHandle<()> {
        self.scheduler.clone().run()
    }

    /// Classify `text` against the current task list.
    pub fn interpret(&self, text: &str) -> Intent {
        let guard = state::lock(&self.state);
        interpreter::interpret(text, &guard.tasks)
    }

    /// Process one raw command end to end.
    pub async fn handle<P>(&self, text: &str, prompt: &mut P) -> CommandOutcome
    where
        P: DateTimePrompt + ?Sized,
    {
        let Some(command) = normalize_command(text) else {
            return CommandOutcome::Ignored;
        };
        info!("processing command: {command}");
        let intent = self.interpret(&command);
        self.execute(intent, prompt).await
    }

    /// Apply the effects of `intent`, persisting after any mutation.
    pub async fn execute<P>(&self, intent: Intent, prompt: &mut P) -> CommandOutcome
    where
        P: DateTimePrompt + ?Sized,
    {
        match intent {
            Intent::AddTask { task } => {
                let mut guard = state::lock(&self.state);
                guard.tasks.add(task.clone());
                info!("adding task: {task}");
                self.persist(&guard);
                CommandOutcome::TaskAdded(task)
            }
            Intent::RemoveTask { task } => {
                let mut guard = state::lock(&self.state);
                if !guard.tasks.remove(&task) {
                    return CommandOutcome::Ignored;
                }
                info!("removing task: {task}");
                self.persist(&guard);
                CommandOutcome::TaskRemoved(task)
            }
            Intent::ShowTasks => {
                info!("showing tasks");
                CommandOutcome::ShowTasks(self.tasks())
            }
            Intent::SetReminder { task } => {
                let Some(answer) = prompt.ask_datetime().await else {
                    info!("reminder not set: no time given");
                    return CommandOutcome::ReminderDiscarded;
                };
                match interpreter::parse_reminder_time(&answer) {
                    Some(due) => CommandOutcome::ReminderSet(self.schedule_reminder(task, due)),
                    None => CommandOutcome::ReminderDiscarded,
                }
            }
            Intent::NoOp(NoOpReason::EmptyTask) => {
                info!("no task detected");
                CommandOutcome::Ignored
            }
            Intent::NoOp(NoOpReason::TaskNotFound) => {
                info!("task to remove is not in the list");
                CommandOutcome::Ignored
            }
            Intent::Unknown => {
                info!("command not recognized");
                CommandOutcome::Ignored
            }
        }
    }

    /// Add a pending reminder and persist.
    pub fn schedule_reminder(&self, task: impl Into<String>, due: NaiveDateTime) -> Reminder {
        self.scheduler.schedule(task, due)
    }

    fn persist(&self, state: &AppState) {
        if let Err(e) = self.store.save(state) {
            error!("cannot persist tasks: {e}");
        }
    }
}
