//! CLI binary for voicetask.

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use voicetask::input::{CommandRecognizer, SpeechRecognizer, Transcript};
use voicetask::interpreter::REMINDER_TIME_FORMAT;
use voicetask::presentation::{DATETIME_PROMPT, DateTimePrompt, FixedPrompt, render_tasks};
use voicetask::scheduler::Notification;
use voicetask::{AppContext, CommandOutcome, StateStore, TrackerConfig, diagnostics, quote};

/// voicetask: a to-do list with reminders, driven by typed or spoken commands.
#[derive(Parser)]
#[command(name = "voicetask", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the task/reminder state file.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Start an interactive session (default).
    Run,

    /// Process a single command, e.g. `exec add buy milk`.
    Exec {
        /// Command text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Reminder time (YYYY-MM-DD HH:MM) for "remind me to" commands.
        #[arg(long)]
        at: Option<String>,
    },

    /// Print tasks and pending reminders.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrackerConfig::from_file(path)?,
        None => TrackerConfig::load_or_default(&TrackerConfig::default_config_path()),
    };
    if let Some(state) = cli.state {
        config.storage.path = Some(state);
    }

    let _log_guard = diagnostics::init_logging(&config.logging);
    let store = StateStore::new(config.storage.state_path());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_interactive(config, store).await,
        Command::Exec { text, at } => run_exec(store, &text.join(" "), at).await,
        Command::List => list(&store),
    }
}

async fn run_interactive(config: TrackerConfig, store: StateStore) -> anyhow::Result<()> {
    println!("voicetask v{}", env!("CARGO_PKG_VERSION"));

    let (ctx, mut notifications) = AppContext::open(store);
    let ctx = ctx.with_poll_interval(config.scheduler.poll_interval());
    // Runs until the process exits; never joined.
    let _scheduler = ctx.spawn_scheduler();

    let quote = quote::quote_of_the_day(&config.quote).await;
    println!("\n  \"{quote}\"\n");
    println!("{}", render_tasks(&ctx.tasks()));
    println!(
        "\nType a command (\"add ...\", \"remove ...\", \"show\", \"remind me to ...\"), \
         /voice to speak, /quit to exit."
    );

    let recognizer = config
        .speech
        .command
        .as_deref()
        .and_then(CommandRecognizer::from_argv);
    let mut terminal = TerminalPrompt::new();

    loop {
        print_flush("> ");
        tokio::select! {
            line = terminal.next_line() => {
                let Some(line) = line else { break };
                match line.trim() {
                    "/quit" | "/exit" => break,
                    "/voice" => match &recognizer {
                        Some(recognizer) => {
                            if let Some(command) = listen(recognizer.clone()).await.into_command() {
                                process(&ctx, &command, &mut terminal).await;
                            }
                        }
                        None => println!("Voice input is not configured (set speech.command)."),
                    },
                    text => process(&ctx, text, &mut terminal).await,
                }
            }
            Some(note) = notifications.recv() => show_notification(&note),
        }
    }

    info!("session ended");
    Ok(())
}

async fn run_exec(store: StateStore, text: &str, at: Option<String>) -> anyhow::Result<()> {
    let (ctx, _notifications) = AppContext::open(store);
    let mut prompt = FixedPrompt::new(at);
    let outcome = ctx.handle(text, &mut prompt).await;
    report(&ctx, &outcome);
    Ok(())
}

fn list(store: &StateStore) -> anyhow::Result<()> {
    let state = store.load();
    println!("{}", render_tasks(state.tasks.list()));
    if !state.reminders.is_empty() {
        println!("\nReminders:");
        for reminder in &state.reminders {
            println!(
                "  {}  {}",
                reminder.time.format(REMINDER_TIME_FORMAT),
                reminder.task
            );
        }
    }
    Ok(())
}

async fn process(ctx: &AppContext, text: &str, terminal: &mut TerminalPrompt) {
    let outcome = ctx.handle(text, terminal).await;
    report(ctx, &outcome);
}

fn report(ctx: &AppContext, outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::TaskAdded(task) => println!("Added: {task}"),
        CommandOutcome::TaskRemoved(task) => println!("Removed: {task}"),
        CommandOutcome::ShowTasks(_) | CommandOutcome::Ignored => {}
        CommandOutcome::ReminderSet(reminder) => println!(
            "Reminder set for {}: {}",
            reminder.time.format(REMINDER_TIME_FORMAT),
            reminder.task
        ),
        CommandOutcome::ReminderDiscarded => println!("No reminder set."),
    }
    if outcome.needs_render() {
        println!("{}", render_tasks(&ctx.tasks()));
    }
}

fn show_notification(note: &Notification) {
    println!("\n*** {} ***", note.message());
    print_flush("> ");
}

/// Run one blocking speech capture off the async workers.
async fn listen(mut recognizer: CommandRecognizer) -> Transcript {
    println!("Listening for commands...");
    tokio::task::spawn_blocking(move || recognizer.listen())
        .await
        .unwrap_or_else(|e| Transcript::ServiceUnavailable(format!("capture task failed: {e}")))
}

fn print_flush(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

/// Line-based stdin front-end, also answering the reminder time prompt.
struct TerminalPrompt {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalPrompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next input line; `None` at end of input.
    async fn next_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!("cannot read input: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl DateTimePrompt for TerminalPrompt {
    async fn ask_datetime(&mut self) -> Option<String> {
        print_flush(&format!("{DATETIME_PROMPT} "));
        let answer = self.next_line().await?;
        let answer = answer.trim();
        if answer.is_empty() {
            None
        } else {
            Some(answer.to_owned())
        }
    }
}
