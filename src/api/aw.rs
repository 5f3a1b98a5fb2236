//! ActivityWatch REST client.
//!
//! Talks to the `aw-server` HTTP API (v0) to read AFK status events from the
//! AFK watcher's bucket and to store annotations in a bucket owned by this
//! watcher (`aw-watcher-ask-away_<hostname>`).
//!
//! ## Endpoints
//!
//! | Method | Path                               | Use                               |
//! |--------|------------------------------------|-----------------------------------|
//! | GET    | `/api/0/buckets/`                  | list buckets                      |
//! | POST   | `/api/0/buckets/{id}`              | create the annotation bucket      |
//! | GET    | `/api/0/buckets/{id}/events?limit` | recent events, most recent first  |
//! | POST   | `/api/0/buckets/{id}/events`       | insert an annotation              |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use askaway::api::{ActivityFeed, AwClient};
//! use askaway::libs::config::ServerConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = AwClient::new(&ServerConfig::default(), false);
//! let buckets = client.resolve_buckets().await?;
//! let events = client.fetch_recent_events(&buckets.afk, 10).await?;
//! # Ok(())
//! # }
//! ```

use super::{ActivityFeed, AnnotationStore, Buckets, FeedError};
use crate::libs::config::ServerConfig;
use crate::libs::event::{duration_to_seconds, seconds_to_duration, Interval, NotedAway, Status, StatusEvent};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info};

/// Name this watcher registers under; also the annotation bucket prefix.
pub const WATCHER_NAME: &str = "aw-watcher-ask-away";
/// Event type of the annotation bucket.
const BUCKET_EVENT_TYPE: &str = "afktask";
/// Event data field holding the user's annotation.
const MESSAGE_KEY: &str = "message";
/// Event data field holding the AFK status.
const STATUS_KEY: &str = "status";

/// An event as serialized by `aw-server`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AwEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    timestamp: DateTime<Utc>,
    /// Seconds, fractional.
    duration: f64,
    #[serde(default)]
    data: Map<String, Value>,
}

impl AwEvent {
    fn status_event(&self) -> Option<StatusEvent> {
        let status = self.data.get(STATUS_KEY).and_then(Value::as_str).and_then(Status::from_wire)?;
        Some(StatusEvent::new(self.timestamp, seconds_to_duration(self.duration), status))
    }

    fn noted_away(&self) -> NotedAway {
        let annotation = self.data.get(MESSAGE_KEY).and_then(Value::as_str).unwrap_or_default();
        NotedAway::new(Interval::from_duration(self.timestamp, seconds_to_duration(self.duration)), annotation)
    }

    fn from_noted(noted: &NotedAway) -> Self {
        let mut data = Map::new();
        data.insert(MESSAGE_KEY.to_string(), Value::String(noted.annotation.clone()));
        Self {
            id: None,
            timestamp: noted.interval.start,
            duration: duration_to_seconds(&noted.interval.duration()),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewBucket<'a> {
    client: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    hostname: &'a str,
}

/// HTTP client for a single `aw-server` instance.
#[derive(Debug, Clone)]
pub struct AwClient {
    client: Client,
    api_url: String,
    hostname: String,
}

impl AwClient {
    /// Creates a client for the configured server.
    ///
    /// With `testing` set, the testing instance URL is used instead.
    pub fn new(config: &ServerConfig, testing: bool) -> Self {
        let api_url = if testing { &config.testing_api_url } else { &config.api_url };
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            hostname: sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string()),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn annotation_bucket_id(&self) -> String {
        format!("{}_{}", WATCHER_NAME, self.hostname)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/0/{}", self.api_url, path)
    }

    /// Lists bucket ids, sorted.
    pub async fn get_buckets(&self) -> Result<Vec<String>, FeedError> {
        let buckets: HashMap<String, Value> = self
            .client
            .get(self.url("buckets/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut ids: Vec<String> = buckets.into_keys().collect();
        ids.sort();
        Ok(ids)
    }

    pub async fn create_bucket(&self, bucket_id: &str) -> Result<(), FeedError> {
        let body = NewBucket {
            client: WATCHER_NAME,
            event_type: BUCKET_EVENT_TYPE,
            hostname: &self.hostname,
        };
        self.client
            .post(self.url(&format!("buckets/{}", bucket_id)))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        info!("Created bucket {}", bucket_id);
        Ok(())
    }

    async fn get_events(&self, bucket_id: &str, limit: usize) -> Result<Vec<AwEvent>, FeedError> {
        let events = self
            .client
            .get(self.url(&format!("buckets/{}/events", bucket_id)))
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(events)
    }

    async fn insert_event(&self, bucket_id: &str, event: &AwEvent) -> Result<(), FeedError> {
        self.client
            .post(self.url(&format!("buckets/{}/events", bucket_id)))
            .json(&[event])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Finds the AFK bucket and makes sure the annotation bucket exists.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedError::BucketNotFound`] or [`FeedError::AmbiguousBuckets`]
    /// when the AFK bucket cannot be identified, and with
    /// [`FeedError::Transient`] when the server cannot be reached.
    pub async fn resolve_buckets(&self) -> Result<Buckets, FeedError> {
        let ids = self.get_buckets().await?;
        let annotations = self.annotation_bucket_id();
        let afk = find_afk_bucket(&ids, &annotations)?;

        if !ids.contains(&annotations) {
            self.create_bucket(&annotations).await?;
        }

        debug!("Using afk bucket {} and annotation bucket {}", afk, annotations);
        Ok(Buckets { afk, annotations })
    }
}

/// Converts raw events, most recent first, into status events.
///
/// Events without an AFK status, or whose end lies past the representable
/// range, are skipped. When the most recent event is one of those the whole poll
/// comes back empty: whether the user is away right now is unknown, so nothing
/// is offered until a later poll shows a usable event first.
fn status_events(raw: &[AwEvent]) -> Vec<StatusEvent> {
    let parsed: Vec<Option<StatusEvent>> = raw
        .iter()
        .map(|event| {
            let status = event.status_event().filter(|status| status.checked_end().is_some());
            if status.is_none() {
                debug!("Skipping unusable afk event: {} {}s {:?}", event.timestamp, event.duration, event.data);
            }
            status
        })
        .collect();

    match parsed.first() {
        Some(None) => {
            debug!("Most recent afk event is unusable, not evaluating this poll");
            Vec::new()
        }
        _ => parsed.into_iter().flatten().collect(),
    }
}

/// Picks the single bucket whose id contains `afk`, ignoring `own`.
pub fn find_afk_bucket(ids: &[String], own: &str) -> Result<String, FeedError> {
    let matches: Vec<&String> = ids.iter().filter(|id| id.contains("afk") && id.as_str() != own).collect();
    match matches.as_slice() {
        [] => Err(FeedError::BucketNotFound),
        [bucket] => Ok((*bucket).clone()),
        _ => Err(FeedError::AmbiguousBuckets(matches.iter().map(|id| (*id).clone()).collect())),
    }
}

impl ActivityFeed for AwClient {
    async fn fetch_recent_events(&self, bucket_id: &str, limit: usize) -> Result<Vec<StatusEvent>, FeedError> {
        let raw = self.get_events(bucket_id, limit).await?;
        Ok(status_events(&raw))
    }

    async fn seed_recent_window(&self, bucket_id: &str, limit: usize) -> Result<Vec<NotedAway>, FeedError> {
        let raw = self.get_events(bucket_id, limit).await?;
        Ok(raw.iter().map(AwEvent::noted_away).collect())
    }
}

impl AnnotationStore for AwClient {
    async fn commit(&self, bucket_id: &str, noted: &NotedAway) -> Result<(), FeedError> {
        let event = AwEvent::from_noted(noted);
        debug!("Posting event: {:?}", event);
        self.insert_event(bucket_id, &event).await
    }
}
