//! Bounded memory of away intervals the user has already been asked about.
//!
//! The activity server does not report the same absence identically across polls:
//! timestamps drift by a few milliseconds and boundaries move as small adjacent
//! events get merged upstream. Exact `(start, duration)` matching therefore asks
//! twice. Membership here is fuzzy instead: a candidate counts as seen when some
//! remembered interval covers more than `overlap_threshold` of it.
//!
//! The window is small (ten entries by default) and scanned linearly.

use super::event::{duration_to_seconds, Interval, NotedAway};
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.95;

/// FIFO window of recently noted absences, oldest evicted first.
///
/// Insertion order reflects when an absence was reported, not when it started.
#[derive(Debug, Clone)]
pub struct DedupWindow {
    entries: VecDeque<NotedAway>,
    capacity: usize,
    overlap_threshold: f64,
}

impl Default for DedupWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_OVERLAP_THRESHOLD)
    }
}

impl DedupWindow {
    /// Creates an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize, overlap_threshold: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            overlap_threshold,
        }
    }

    /// Creates a window pre-filled from durable history.
    ///
    /// History is ordered by start time and only the newest `capacity` entries are
    /// kept. Overlapping history entries are accepted as-is: they are double
    /// prompts that already happened, not something to reject now.
    pub fn seeded(capacity: usize, overlap_threshold: f64, history: impl IntoIterator<Item = NotedAway>) -> Self {
        let mut window = Self::new(capacity, overlap_threshold);
        let mut history: Vec<NotedAway> = history.into_iter().collect();
        history.sort_by_key(|noted| noted.interval.start);
        for noted in history {
            window.push_bounded(noted);
        }
        window
    }

    /// Returns true if the candidate was already reported, using the configured threshold.
    pub fn has_event(&self, candidate: &Interval) -> bool {
        self.has_event_with(candidate, self.overlap_threshold)
    }

    /// Returns true if any remembered interval covers more than `overlap_threshold`
    /// of `candidate`.
    ///
    /// # Panics
    ///
    /// Panics on a zero-length candidate, where the ratio is undefined. Such
    /// candidates must be filtered out before they get here.
    pub fn has_event_with(&self, candidate: &Interval, overlap_threshold: f64) -> bool {
        let length = duration_to_seconds(&candidate.duration());
        assert!(length > 0.0, "zero-length candidate reached the dedup test: {}", candidate);

        self.entries.iter().any(|noted| {
            let overlap = duration_to_seconds(&noted.interval.overlap(candidate));
            overlap / length > overlap_threshold
        })
    }

    /// Records a newly annotated interval, evicting the oldest entry when full.
    ///
    /// # Panics
    ///
    /// Panics if the interval is already covered by the window; the caller must
    /// only add intervals that passed [`DedupWindow::has_event`].
    pub fn add_event(&mut self, interval: Interval, annotation: impl Into<String>) -> &NotedAway {
        assert!(!self.has_event(&interval), "interval already noted: {}", interval);
        self.push_bounded(NotedAway::new(interval, annotation))
    }

    fn push_bounded(&mut self, noted: NotedAway) -> &NotedAway {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(noted);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn overlap_threshold(&self) -> f64 {
        self.overlap_threshold
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &NotedAway> {
        self.entries.iter()
    }

    /// Annotation texts from oldest to newest.
    pub fn annotations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|noted| noted.annotation.as_str())
    }
}

/// Finds stored annotations that overlap in time.
///
/// Each returned pair is an absence the user was asked about twice. Input order
/// does not matter; pairs come back ordered by the first entry's start.
pub fn overlapping_pairs(noted: &[NotedAway]) -> Vec<(&NotedAway, &NotedAway)> {
    let mut sorted: Vec<&NotedAway> = noted.iter().collect();
    sorted.sort_by_key(|n| n.interval.start);

    let mut pairs = Vec::new();
    for (i, first) in sorted.iter().enumerate() {
        for second in sorted[i + 1..].iter().take_while(|n| n.interval.start < first.interval.end) {
            pairs.push((*first, *second));
        }
    }
    pairs
}
