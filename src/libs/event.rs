//! Status events reported by the activity feed and the intervals derived from them.
//!
//! The feed reports binary AFK status as `(timestamp, duration, status)` triples.
//! Everything downstream of the feed works on [`Interval`]s, which are plain
//! `[start, end]` spans with `end >= start`.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Device-reported presence status.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The user is at the keyboard (`not-afk` on the wire).
    Active,
    /// The user is away (`afk` on the wire).
    Away,
}

impl Status {
    /// Parses the status string used by the activity server.
    ///
    /// Returns `None` for anything other than `afk` / `not-afk`.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "not-afk" => Some(Status::Active),
            "afk" => Some(Status::Away),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Status::Active => "not-afk",
            Status::Away => "afk",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// A single status report from the activity feed.
///
/// Ordering is not guaranteed and the same physical event may show up again in a
/// later poll with a timestamp that differs by a few milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEvent {
    pub timestamp: DateTime<Utc>,
    /// Never negative; zero is valid.
    pub duration: Duration,
    pub status: Status,
}

impl StatusEvent {
    pub fn new(timestamp: DateTime<Utc>, duration: Duration, status: Status) -> Self {
        Self {
            timestamp,
            duration: duration.max(Duration::zero()),
            status,
        }
    }

    /// End of the event, or `None` when it lies past the representable range.
    pub fn checked_end(&self) -> Option<DateTime<Utc>> {
        self.timestamp.checked_add_signed(self.duration)
    }

    /// End of the event, saturating at the latest representable time.
    pub fn end(&self) -> DateTime<Utc> {
        self.checked_end().unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_away(&self) -> bool {
        self.status == Status::Away
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.timestamp, self.end())
    }
}

/// A closed time span with `end >= start`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates an interval.
    ///
    /// # Panics
    ///
    /// Panics if `end` precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(end >= start, "interval ends before it starts: {} > {}", start, end);
        Self { start, end }
    }

    /// Creates an interval of `duration` from `start`, saturating at the latest
    /// representable time.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Self {
        let end = start
            .checked_add_signed(duration.max(Duration::zero()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(start, end)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length of the time shared with `other`, zero when they are disjoint.
    pub fn overlap(&self, other: &Interval) -> Duration {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end - start).max(Duration::zero())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.start.to_rfc3339(), duration_to_seconds(&self.duration()))
    }
}

/// An away interval the user has already been asked about, with their answer.
#[derive(Clone, Debug, PartialEq)]
pub struct NotedAway {
    pub interval: Interval,
    pub annotation: String,
}

impl NotedAway {
    pub fn new(interval: Interval, annotation: impl Into<String>) -> Self {
        Self {
            interval,
            annotation: annotation.into(),
        }
    }
}

/// Converts fractional seconds (as reported by the server) to a duration with
/// microsecond precision. Negative and non-finite values become zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::zero();
    }
    Duration::microseconds((seconds * 1_000_000.0).round() as i64)
}

pub fn duration_to_seconds(duration: &Duration) -> f64 {
    match duration.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => duration.num_milliseconds() as f64 / 1_000.0,
    }
}
