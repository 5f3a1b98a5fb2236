//! Time formatting for prompts and tables.
//!
//! ## Format Specifications
//!
//! - Durations in tables use `HH:MM`, zero-padded, negative clamped to `00:00`.
//! - Clock times are shown in the local timezone as `HH:MM` on a 12-hour clock,
//!   the way the prompt has always phrased them.
//!
//! ## Examples
//!
//! ```rust
//! use askaway::libs::formatter::format_duration;
//! use chrono::Duration;
//!
//! let duration = Duration::hours(2) + Duration::minutes(30);
//! assert_eq!(format_duration(&duration), "02:30");
//! ```

use super::event::{duration_to_seconds, NotedAway};
use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

/// An annotation rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedAnnotation {
    pub id: i32,

    /// Local date and time the absence started.
    pub start: String,

    /// Local time the absence ended.
    pub end: String,

    /// `HH:MM`.
    pub duration: String,

    pub message: String,
}

impl FormattedAnnotation {
    pub fn from_noted(id: i32, noted: &NotedAway) -> Self {
        Self {
            id,
            start: noted.interval.start.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            end: noted.interval.end.with_timezone(&Local).format("%H:%M").to_string(),
            duration: format_duration(&noted.interval.duration()),
            message: noted.annotation.clone(),
        }
    }
}

pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Local wall-clock time on a 12-hour clock, e.g. `03:58`.
pub fn format_clock(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%I:%M").to_string()
}

/// Fractional minutes, e.g. 6.65 for 6m39s.
pub fn minutes(duration: &Duration) -> f64 {
    duration_to_seconds(duration) / 60.0
}
