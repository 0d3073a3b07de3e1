//! anon-chat binary: run the bot or print stats. Config from env (and `.env`) plus CLI args.

use anon_bot::{database_url_from_env, print_stats, run_bot, BotConfig, Cli, Commands};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::Stats => print_stats(&database_url_from_env()).await,
    }
}
