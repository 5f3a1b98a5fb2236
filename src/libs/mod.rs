//! Core library modules for askaway.
//!
//! ## Features
//!
//! - **Absence detection**: status events, interval algebra, dedup memory and the
//!   per-poll reconciliation policy
//! - **Watch loop**: the poll/prompt/store cycle and its signal handling
//! - **Core Infrastructure**: configuration, data storage, messaging
//! - **User Interface**: prompts, tables and time formatting
//!
//! ## Usage
//!
//! ```rust
//! use askaway::libs::event::{Status, StatusEvent};
//! use askaway::libs::reconcile::{PollOutcome, Reconciler};
//! use askaway::libs::config::WatcherConfig;
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let events = vec![
//!     StatusEvent::new(now - Duration::seconds(5), Duration::seconds(5), Status::Active),
//!     StatusEvent::new(now - Duration::minutes(20), Duration::minutes(2), Status::Active),
//! ];
//! let thresholds = WatcherConfig::default().thresholds();
//! match Reconciler::default().poll(&events, now, &thresholds) {
//!     PollOutcome::Ready(candidates) => assert_eq!(candidates.len(), 1),
//!     PollOutcome::Suppressed => unreachable!(),
//! }
//! ```

pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod dedup;
pub mod event;
pub mod formatter;
pub mod interval;
pub mod messages;
pub mod monitor;
pub mod prompt;
pub mod reconcile;
pub mod view;
