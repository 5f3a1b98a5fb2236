use crate::api::{ActivityFeed, AwClient};
use crate::libs::{config::Config, messages::Message, view::View};
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Number of most recent annotations to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Use the testing server
    #[arg(long)]
    pub testing: bool,
}

pub async fn cmd(args: LogArgs) -> Result<()> {
    let config = Config::read()?;
    let client = AwClient::new(&config.server.unwrap_or_default(), args.testing);

    let mut annotations = client.seed_recent_window(&client.annotation_bucket_id(), args.limit).await?;
    if annotations.is_empty() {
        msg_print!(Message::NoAnnotationsFound);
        return Ok(());
    }
    annotations.sort_by_key(|noted| noted.interval.start);

    msg_print!(Message::AnnotationsHeader(annotations.len()), true);
    View::annotations(&annotations);
    Ok(())
}
