//! The watch loop: poll the activity server, ask about new absences, store answers.
//!
//! [`Monitor`] is the long-lived context of one `askaway watch` run. It owns the
//! server client, the prompt, the resolved buckets and the [`Reconciler`] with its
//! dedup memory, and drives them one cycle at a time:
//!
//! 1. Fetch the most recent status events. A transient failure skips the cycle.
//! 2. Let the reconciler decide between waiting (still away) and a list of
//!    candidates.
//! 3. Prompt for each candidate in order. An answer is stored on the server first
//!    and only then remembered; a dismissed prompt leaves the candidate to be
//!    offered again next cycle.
//!
//! Cycles never overlap and a prompt blocks the loop until it is resolved.

use super::config::WatcherConfig;
use super::dedup::DedupWindow;
use super::event::{Interval, NotedAway};
use super::messages::Message;
use super::prompt::Prompt;
use super::reconcile::{PollOutcome, Reconciler, Thresholds};
use crate::api::{ActivityFeed, AnnotationStore, Buckets};
use crate::{msg_debug, msg_error, msg_error_anyhow, msg_info, msg_success};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

/// Number of status events fetched per poll.
pub const FETCH_LIMIT: usize = 10;

/// Where the watch loop stands after its last cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No cycle has completed yet.
    Unknown,
    /// Polling with nothing to ask about.
    Polling,
    /// The user is away right now.
    Suppressed,
    /// The last cycle offered at least one absence.
    CandidatesReady,
    /// The server could not be reached.
    Unavailable,
}

impl fmt::Display for WatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WatchState::Unknown => "unknown",
            WatchState::Polling => "polling",
            WatchState::Suppressed => "away",
            WatchState::CandidatesReady => "asking",
            WatchState::Unavailable => "server unavailable",
        };
        write!(f, "{}", name)
    }
}

/// What a single cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleReport {
    /// Events could not be fetched; nothing changed.
    Skipped,
    /// The user is still away; nothing was asked.
    Suppressed,
    /// `offered` prompts were shown and `committed` of them were answered.
    Noted { offered: usize, committed: usize },
}

pub struct Monitor<C, P> {
    config: WatcherConfig,
    thresholds: Thresholds,
    client: C,
    prompt: P,
    buckets: Buckets,
    reconciler: Reconciler,
    state: WatchState,
}

impl<C, P> Monitor<C, P>
where
    C: ActivityFeed + AnnotationStore,
    P: Prompt,
{
    /// Builds the watch context, seeding the dedup memory and the prompt history
    /// from the annotations already stored on the server.
    ///
    /// # Errors
    ///
    /// Fails if the stored annotations cannot be read.
    pub async fn new(config: WatcherConfig, client: C, mut prompt: P, buckets: Buckets) -> Result<Self> {
        let history = client
            .seed_recent_window(&buckets.annotations, config.dedup_window_capacity)
            .await?;
        let memory = DedupWindow::seeded(config.dedup_window_capacity, config.dedup_overlap_threshold, history);
        msg_debug!(Message::DedupMemorySeeded(memory.len()));

        let past_answers: Vec<String> = memory.annotations().map(str::to_string).collect();
        prompt.seed_history(&past_answers);

        Ok(Self {
            thresholds: config.thresholds(),
            config,
            client,
            prompt,
            buckets,
            reconciler: Reconciler::new(memory),
            state: WatchState::Unknown,
        })
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Runs cycles until one fails.
    pub async fn run(&mut self) -> Result<()> {
        msg_info!(Message::WatcherStarted {
            recency_window: self.config.recency_window_seconds,
            poll_interval: self.config.poll_interval_seconds,
            min_duration: self.config.min_duration_seconds,
        });

        loop {
            self.cycle(Utc::now()).await?;
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Runs one poll as of `now`.
    ///
    /// # Errors
    ///
    /// Fails if a prompt cannot be shown or an answer cannot be stored. Server
    /// read failures are not errors; they skip the cycle.
    pub async fn cycle(&mut self, now: DateTime<Utc>) -> Result<CycleReport> {
        debug!("Polling {}", self.buckets.afk);

        let events = match self.client.fetch_recent_events(&self.buckets.afk, FETCH_LIMIT).await {
            Ok(events) => events,
            Err(e) if e.is_transient() => {
                msg_error!(Message::FeedUnavailable(e.to_string()));
                self.settle(WatchState::Unavailable);
                return Ok(CycleReport::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let candidates = match self.reconciler.poll(&events, now, &self.thresholds) {
            PollOutcome::Suppressed => {
                self.settle(WatchState::Suppressed);
                return Ok(CycleReport::Suppressed);
            }
            PollOutcome::Ready(candidates) if candidates.is_empty() => {
                self.settle(WatchState::Polling);
                return Ok(CycleReport::Noted { offered: 0, committed: 0 });
            }
            PollOutcome::Ready(candidates) => candidates,
        };

        self.settle(WatchState::CandidatesReady);

        let mut offered = 0;
        let mut committed = 0;
        for candidate in candidates {
            // An answer earlier in this cycle may already cover it.
            if self.reconciler.is_seen(&candidate) {
                continue;
            }

            offered += 1;
            match self.prompt.request_annotation(&candidate)? {
                Some(annotation) => {
                    self.note(candidate, annotation).await?;
                    committed += 1;
                }
                None => msg_info!(Message::PromptDismissed(candidate.to_string())),
            }
        }

        Ok(CycleReport::Noted { offered, committed })
    }

    /// Stores the answer on the server, then remembers it.
    async fn note(&mut self, interval: Interval, annotation: String) -> Result<()> {
        let noted = NotedAway::new(interval, annotation);
        self.client
            .commit(&self.buckets.annotations, &noted)
            .await
            .map_err(|e| msg_error_anyhow!(Message::CommitFailed(e.to_string())))?;

        self.reconciler.commit(noted.interval, noted.annotation);
        msg_success!(Message::AnnotationSaved(interval.to_string()));
        Ok(())
    }

    fn settle(&mut self, next: WatchState) {
        if next != self.state {
            msg_info!(Message::WatcherStateChanged(next.to_string()));
            self.state = next;
        }
    }
}
