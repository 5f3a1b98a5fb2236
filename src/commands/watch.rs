//! Foreground watcher command.
//!
//! Reads the configuration, applies command-line overrides, resolves the server
//! buckets and then runs the watch loop until it fails or is interrupted.

use crate::api::AwClient;
use crate::libs::config::{Config, WatcherConfig};
use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::libs::prompt::TerminalPrompt;
use crate::{msg_error_anyhow, msg_info};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Only ask about absences that ended within this many minutes
    #[arg(long)]
    pub depth: Option<f64>,

    /// Seconds between polls of the server
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Only ask about absences longer than this many minutes
    #[arg(long)]
    pub length: Option<f64>,

    /// Use the testing server
    #[arg(long)]
    pub testing: bool,
}

impl WatchArgs {
    /// Applies the overrides given on the command line.
    pub fn apply(&self, mut watcher: WatcherConfig) -> WatcherConfig {
        if let Some(depth) = self.depth {
            watcher.recency_window_seconds = depth * 60.0;
        }
        if let Some(frequency) = self.frequency {
            watcher.poll_interval_seconds = frequency;
        }
        if let Some(length) = self.length {
            watcher.min_duration_seconds = length * 60.0;
        }
        watcher
    }
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let config = Config::read()?;
    let watcher = args.apply(config.watcher.unwrap_or_default());
    watcher.validate()?;
    let client = AwClient::new(&config.server.unwrap_or_default(), args.testing);

    let buckets = client
        .resolve_buckets()
        .await
        .map_err(|e| msg_error_anyhow!(Message::BucketsNotResolved(e.to_string())))?;
    msg_info!(Message::UsingBuckets {
        afk: buckets.afk.clone(),
        annotations: buckets.annotations.clone(),
    });

    let mut monitor = Monitor::new(watcher, client, TerminalPrompt::new(), buckets).await?;
    msg_info!(Message::WatcherStartingForeground);
    daemon::run_until_shutdown(monitor.run()).await
}
