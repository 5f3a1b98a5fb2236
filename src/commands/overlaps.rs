//! Lists stored annotations that overlap in time.
//!
//! Every pair is an absence the user was asked about more than once. Useful when
//! tuning the dedup overlap threshold.

use crate::api::{ActivityFeed, AwClient};
use crate::libs::{config::Config, dedup::overlapping_pairs, messages::Message, view::View};
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct OverlapsArgs {
    /// Number of most recent annotations to check
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,

    /// Use the testing server
    #[arg(long)]
    pub testing: bool,
}

pub async fn cmd(args: OverlapsArgs) -> Result<()> {
    let config = Config::read()?;
    let client = AwClient::new(&config.server.unwrap_or_default(), args.testing);

    let annotations = client.seed_recent_window(&client.annotation_bucket_id(), args.limit).await?;
    let pairs = overlapping_pairs(&annotations);
    if pairs.is_empty() {
        msg_print!(Message::NoOverlapsFound);
        return Ok(());
    }

    msg_print!(Message::OverlapsFound(pairs.len()), true);
    View::overlaps(&pairs);
    Ok(())
}
