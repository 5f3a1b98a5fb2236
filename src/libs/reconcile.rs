//! Per-poll reconciliation: which absences should the user be asked about now?
//!
//! Each poll hands the most recent status events to a [`Reconciler`]. It answers
//! either [`PollOutcome::Suppressed`] (the user is still away, so wait) or
//! [`PollOutcome::Ready`] with the away intervals worth prompting for.
//!
//! ## Pipeline
//!
//! ```text
//! events ─▶ drop zero-length ─▶ active only ─▶ normalize ─▶ gaps
//!        ─▶ drop already noted ─▶ merge across short blips
//!        ─▶ keep long enough and recent enough ─▶ sorted candidates
//! ```
//!
//! Away candidates are the gaps between active intervals rather than the raw
//! `afk` events: the server does not report suspended or powered-off time as
//! `afk`, and gaps cover it anyway.
//!
//! Noted intervals are dropped before gaps are merged. Merging first would glue a
//! fresh absence onto one that was already answered across a short blip, and the
//! result would overlap the noted one too little to be recognised.
//!
//! Zero-length events are dropped up front. Waking a machine from suspend without
//! touching it leaves a zero-length `not-afk` marker that later polls no longer
//! report; keeping it would split one absence into two prompts.

use super::dedup::DedupWindow;
use super::event::{duration_to_seconds, Interval, NotedAway, Status, StatusEvent};
use super::interval::IntervalSet;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Filters applied to away candidates, supplied per poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Candidates must end after `now - recency_window`.
    pub recency_window: Duration,
    /// Candidates must last strictly longer than this.
    pub min_duration: Duration,
    /// Gaps separated by less active time than this are merged.
    pub heartbeat_pulse: Duration,
}

/// Result of evaluating one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The most recent event is `afk`; the absence is still going on.
    Suppressed,
    /// Candidates to prompt for, in ascending start order. May be empty.
    Ready(Vec<Interval>),
}

/// Owns the dedup memory for one run and turns polls into prompt candidates.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    memory: DedupWindow,
}

impl Reconciler {
    pub fn new(memory: DedupWindow) -> Self {
        Self { memory }
    }

    pub fn memory(&self) -> &DedupWindow {
        &self.memory
    }

    /// Evaluates a poll. `events` must be in the server's order, most recent first.
    pub fn poll(&self, events: &[StatusEvent], now: DateTime<Utc>, thresholds: &Thresholds) -> PollOutcome {
        match events.first() {
            Some(latest) if latest.is_away() => {
                debug!("Currently away since {}, not prompting yet", latest.timestamp);
                PollOutcome::Suppressed
            }
            _ => PollOutcome::Ready(self.unseen_away_intervals(events, now, thresholds)),
        }
    }

    /// Derives away intervals that are new, long enough and recent enough.
    ///
    /// Unlike [`Reconciler::poll`] this does not look at whether the user is
    /// currently away.
    pub fn unseen_away_intervals(&self, events: &[StatusEvent], now: DateTime<Utc>, thresholds: &Thresholds) -> Vec<Interval> {
        debug!(
            "Checking for unseen in: {:?}",
            events
                .iter()
                .map(|e| (e.timestamp.to_rfc3339(), duration_to_seconds(&e.duration), e.status.as_wire()))
                .collect::<Vec<_>>()
        );

        let (active, _away): (Vec<&StatusEvent>, Vec<&StatusEvent>) = events
            .iter()
            .filter(|e| e.duration > Duration::zero())
            .partition(|e| e.status == Status::Active);

        let gaps = active.iter().map(|e| e.interval()).collect::<Vec<_>>().normalize().gaps();

        let unseen: Vec<Interval> = gaps.into_iter().filter(|gap| !self.memory.has_event(gap)).collect();

        let recent_after = now
            .checked_sub_signed(thresholds.recency_window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut candidates: Vec<Interval> = unseen
            .merge_gaps(thresholds.heartbeat_pulse)
            .into_iter()
            .filter(|gap| gap.duration() > thresholds.min_duration && gap.end > recent_after)
            .collect();
        candidates.sort_by_key(|gap| gap.start);

        for candidate in &candidates {
            debug!("Found event to note: {}", candidate);
        }
        candidates
    }

    /// Returns true if the interval was already noted.
    pub fn is_seen(&self, interval: &Interval) -> bool {
        self.memory.has_event(interval)
    }

    /// Records a confirmed annotation.
    ///
    /// # Panics
    ///
    /// Panics if the interval was already noted.
    pub fn commit(&mut self, interval: Interval, annotation: impl Into<String>) -> &NotedAway {
        self.memory.add_event(interval, annotation)
    }
}
