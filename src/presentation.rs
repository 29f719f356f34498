//! Contract between the tracker core and whatever displays it.
//!
//! The core asks for a reminder time through [`DateTimePrompt`] and reports
//! fired reminders as [`crate::scheduler::Notification`] values on a channel
//! the front-end drains on its own schedule.

use async_trait::async_trait;

/// Prompt shown when asking for a reminder time.
pub const DATETIME_PROMPT: &str = "Enter date and time (YYYY-MM-DD HH:MM):";

/// Source of the follow-up reminder time.
#[async_trait]
pub trait DateTimePrompt: Send {
    /// Ask for a date/time string. `None` means the user cancelled.
    async fn ask_datetime(&mut self) -> Option<String>;
}

/// Prompt with a pre-supplied answer, used for one-shot commands.
#[derive(Debug, Clone, Default)]
pub struct FixedPrompt {
    answer: Option<String>,
}

impl FixedPrompt {
    pub fn new(answer: Option<String>) -> Self {
        Self { answer }
    }

    /// A prompt that always cancels.
    pub fn cancelled() -> Self {
        Self { answer: None }
    }
}

#[async_trait]
impl DateTimePrompt for FixedPrompt {
    async fn ask_datetime(&mut self) -> Option<String> {
        self.answer.take()
    }
}

/// Render the task list for a plain-text display.
pub fn render_tasks(tasks: &[String]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_owned();
    }
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{:>3}. {task}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
