//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "anon-chat")]
#[command(about = "Anonymous peer-to-peer chat bot for Telegram", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print active-user and open-session counts from the database.
    Stats,
}
