//! # askaway - ask what you were doing while you were away
//!
//! A watcher for the ActivityWatch server. It polls the AFK status bucket, works
//! out which absences the user has not yet explained, asks about them in the
//! terminal and stores the answers back on the server as annotation events.
//!
//! ## Features
//!
//! - **Gap-based absence detection**: absences are the gaps between active
//!   periods, so suspended and powered-off time is covered too
//! - **At-most-once prompting**: answered absences are remembered with a fuzzy
//!   overlap test that tolerates timestamp jitter between polls
//! - **Review**: list recent annotations and spot double prompts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use askaway::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
