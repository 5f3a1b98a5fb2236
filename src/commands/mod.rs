//! Command-line interface of askaway.
//!
//! ## Available Commands
//!
//! - **`init`**: interactive configuration wizard
//! - **`watch`**: poll the activity server and ask about absences
//! - **`log`**: show recent annotations
//! - **`overlaps`**: list stored annotations that overlap in time

pub mod init;
pub mod log;
pub mod overlaps;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Watch for absences and ask what you were doing")]
    Watch(watch::WatchArgs),
    #[command(about = "Show recent annotations")]
    Log(log::LogArgs),
    #[command(about = "List annotations that overlap in time")]
    Overlaps(overlaps::OverlapsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Log(args) => log::cmd(args).await,
            Commands::Overlaps(args) => overlaps::cmd(args).await,
        }
    }
}
