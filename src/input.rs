//! Speech and text input boundary.
//!
//! Whatever the source, the core only ever sees normalized lower-case text.
//! Failed or empty transcriptions produce no command and are only logged.

use crate::error::{Result, TrackerError};
use std::process::Command;
use tracing::{debug, info, warn};

/// Lower-case and trim raw input. Empty input yields `None`.
pub fn normalize_command(raw: &str) -> Option<String> {
    let command = raw.trim().to_lowercase();
    if command.is_empty() {
        None
    } else {
        Some(command)
    }
}

/// Result of one speech capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    /// Speech was recognized.
    Heard(String),
    /// Audio was captured but could not be understood.
    Unintelligible,
    /// The recognizer could not be reached or failed to run.
    ServiceUnavailable(String),
}

impl Transcript {
    /// Turn the transcript into a normalized command, logging failures.
    pub fn into_command(self) -> Option<String> {
        match self {
            Self::Heard(text) => {
                let command = normalize_command(&text);
                match &command {
                    Some(command) => info!("you said: {command}"),
                    None => info!("could not understand audio"),
                }
                command
            }
            Self::Unintelligible => {
                info!("could not understand audio");
                None
            }
            Self::ServiceUnavailable(reason) => {
                warn!("speech recognition unavailable: {reason}");
                None
            }
        }
    }
}

/// Blocking speech capture. Run it off the polling task.
pub trait SpeechRecognizer: Send + 'static {
    /// Capture one utterance and transcribe it.
    fn listen(&mut self) -> Transcript;
}

/// Recognizer backed by an external program.
///
/// The program records and transcribes one utterance and prints the text on
/// stdout. A non-zero exit with output on stderr is treated as unavailable;
/// empty stdout is unintelligible.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// Build from a `[program, args...]` list. Returns `None` if empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl CommandRecognizer {
    /// Run the program once and return its trimmed stdout.
    fn capture(&self) -> Result<String> {
        debug!("listening for commands via {}", self.program);
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| TrackerError::Speech(format!("cannot run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TrackerError::Speech(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn listen(&mut self) -> Transcript {
        match self.capture() {
            Ok(text) if text.is_empty() => Transcript::Unintelligible,
            Ok(text) => Transcript::Heard(text),
            Err(e) => Transcript::ServiceUnavailable(e.to_string()),
        }
    }
}
