//! Display implementation for askaway messages.
//!
//! All user-facing text lives here, in one `match`, so wording stays consistent
//! and every message variant has to be given explicit text.
//!
//! ## Usage Integration
//!
//! ```rust
//! use askaway::libs::messages::Message;
//!
//! let message = Message::PromptDismissed("10:02 - 10:40".to_string());
//! assert_eq!(message.to_string(), "Skipped 10:02 - 10:40, will ask again later");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults apply".to_string(),
            Message::InvalidWatcherSetting { name, value, expected } => {
                format!("Invalid watcher setting {} = {}: expected {}", name, value, expected)
            }
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleWatcher => "Watcher settings".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted {
                recency_window,
                poll_interval,
                min_duration,
            } => {
                format!(
                    "Watcher is running with recency window {}s, poll interval {}s, minimum absence {}s",
                    recency_window, poll_interval, min_duration
                )
            }
            Message::WatcherStartingForeground => "Starting watcher in foreground... Press Ctrl+C to exit.".to_string(),
            Message::WatcherExitedNormally => "Watcher exited normally".to_string(),
            Message::WatcherShuttingDown => "Shutting down watcher...".to_string(),
            Message::WatcherError(error) => format!("Watcher error: {}", error),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Warning: Signal handling not supported on this platform".to_string(),
            Message::WatcherStateChanged(state) => format!("Watcher state: {}", state),
            Message::DedupMemorySeeded(count) => format!("Loaded {} recent annotations", count),

            // === ACTIVITY SERVER MESSAGES ===
            Message::FeedUnavailable(error) => format!("Failed to get events from the server, retrying next poll: {}", error),
            Message::BucketsNotResolved(error) => format!("Cannot start watcher: {}", error),
            Message::UsingBuckets { afk, annotations } => format!("Reading {} and writing to {}", afk, annotations),
            Message::CommitFailed(error) => format!("Failed to store annotation: {}", error),

            // === PROMPT MESSAGES ===
            Message::PromptTitle => "AFK Checkin".to_string(),
            Message::PromptWhatWereYouDoing { start, end, minutes } => {
                format!("What were you doing from {} - {} ({:.1} minutes)?", start, end, minutes)
            }
            Message::AnnotationSaved(interval) => format!("Noted {}", interval),
            Message::PromptDismissed(interval) => format!("Skipped {}, will ask again later", interval),

            // === LOG MESSAGES ===
            Message::AnnotationsHeader(count) => format!("Last {} annotations", count),
            Message::NoAnnotationsFound => "No annotations found".to_string(),
            Message::OverlapsFound(count) => format!("Found {} overlapping annotation pairs:", count),
            Message::NoOverlapsFound => "No overlapping annotations found".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptServerApiUrl => "Activity server URL".to_string(),
            Message::PromptServerTestingApiUrl => "Testing activity server URL".to_string(),
            Message::PromptRecencyWindow => "Only ask about absences that ended within (seconds)".to_string(),
            Message::PromptPollInterval => "Poll interval (seconds)".to_string(),
            Message::PromptMinDuration => "Minimum absence to ask about (seconds)".to_string(),
            Message::PromptHeartbeatPulse => "Merge absences split by less activity than (seconds)".to_string(),
            Message::PromptOverlapThreshold => "Overlap fraction treated as the same absence".to_string(),
            Message::PromptWindowCapacity => "Number of recent answers to remember".to_string(),
        };

        write!(f, "{}", text)
    }
}
