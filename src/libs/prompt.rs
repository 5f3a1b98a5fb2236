//! Asking the user what they were doing while away.

use super::event::Interval;
use super::formatter::{format_clock, minutes};
use super::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, BasicHistory, Input};
use std::io::ErrorKind;
use thiserror::Error;

/// The user pressed Ctrl+C while a prompt was open. The watcher treats this as a
/// request to stop, not as a failure.
#[derive(Debug, Error)]
#[error("prompt interrupted")]
pub struct PromptInterrupted;

/// Something that can ask the user to annotate an away interval.
pub trait Prompt {
    /// Asks about `interval`. Returns `None` when the user gave no answer, in which
    /// case the interval stays unnoted and will be offered again.
    fn request_annotation(&mut self, interval: &Interval) -> Result<Option<String>>;

    /// Makes earlier answers available for recall, oldest first.
    fn seed_history(&mut self, _annotations: &[String]) {}
}

/// The question shown for an interval, e.g.
/// `What were you doing from 03:51 - 03:58 (6.7 minutes)?`
pub fn prompt_text(interval: &Interval) -> String {
    Message::PromptWhatWereYouDoing {
        start: format_clock(&interval.start),
        end: format_clock(&interval.end),
        minutes: minutes(&interval.duration()),
    }
    .to_string()
}

/// Interactive terminal prompt with up/down recall of previous answers.
pub struct TerminalPrompt {
    history: BasicHistory,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            history: BasicHistory::new().max_entries(50).no_duplicates(true),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn request_annotation(&mut self, interval: &Interval) -> Result<Option<String>> {
        msg_print!(Message::PromptTitle, true);

        let response: String = match Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt_text(interval))
            .allow_empty(true)
            .history_with(&mut self.history)
            .interact_text()
        {
            Ok(response) => response,
            Err(e) => return Err(interrupted_or(e)),
        };

        let response = response.trim();
        if response.is_empty() {
            Ok(None)
        } else {
            Ok(Some(response.to_string()))
        }
    }

    fn seed_history(&mut self, annotations: &[String]) {
        use dialoguer::History;

        for annotation in annotations {
            History::<String>::write(&mut self.history, annotation);
        }
    }
}

/// Ctrl+C in raw mode comes back from the terminal as an `Interrupted` read.
fn interrupted_or(error: dialoguer::Error) -> anyhow::Error {
    match error {
        dialoguer::Error::IO(e) if e.kind() == ErrorKind::Interrupted => PromptInterrupted.into(),
        other => other.into(),
    }
}
