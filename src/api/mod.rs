//! Clients for the activity-tracking server.
//!
//! The watcher talks to the server through two narrow seams:
//!
//! - [`ActivityFeed`] reads AFK status events and the annotation history used to
//!   seed the dedup memory.
//! - [`AnnotationStore`] durably writes confirmed annotations.
//!
//! [`aw::AwClient`] implements both against the ActivityWatch REST API. Tests
//! substitute in-memory fakes.
//!
//! ## Errors
//!
//! [`FeedError`] separates failures the poll loop can ride out (network and HTTP
//! errors, retried on the next poll) from configuration problems that must stop
//! the watcher before it starts (missing or ambiguous AFK bucket).

use crate::libs::event::{NotedAway, StatusEvent};
use thiserror::Error;

pub mod aw;

pub use aw::AwClient;

/// Failures talking to the activity server.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network, HTTP status, or decoding failure. Retried on the next poll.
    #[error("activity server request failed: {0}")]
    Transient(#[from] reqwest::Error),

    #[error("cannot find the afk bucket")]
    BucketNotFound,

    #[error("found too many afk buckets: {}", .0.join(", "))]
    AmbiguousBuckets(Vec<String>),
}

impl FeedError {
    /// True for errors the poll loop should log and retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Transient(_))
    }
}

/// Bucket ids the watcher reads from and writes to, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    /// Source of `afk` / `not-afk` status events.
    pub afk: String,
    /// Where this watcher stores annotations.
    pub annotations: String,
}

/// Read side of the activity server.
#[allow(async_fn_in_trait)]
pub trait ActivityFeed {
    /// Fetches up to `limit` of the most recent status events, most recent first.
    async fn fetch_recent_events(&self, bucket_id: &str, limit: usize) -> Result<Vec<StatusEvent>, FeedError>;

    /// Fetches up to `limit` of the most recent stored annotations.
    async fn seed_recent_window(&self, bucket_id: &str, limit: usize) -> Result<Vec<NotedAway>, FeedError>;
}

/// Write side of the activity server.
#[allow(async_fn_in_trait)]
pub trait AnnotationStore {
    /// Durably stores an annotated away interval.
    async fn commit(&self, bucket_id: &str, noted: &NotedAway) -> Result<(), FeedError>;
}
