//! # anon-bot
//!
//! Anonymous peer-to-peer chat bot: [`BotConfig`] from env, the [`Cli`], and [`run_bot`] wiring
//! storage, the session manager, the relay dispatcher and the Telegram dispatcher together.

mod cli;
mod config;
mod runner;

pub use cli::{Cli, Commands};
pub use config::{database_url_from_env, BotConfig};
pub use runner::{print_stats, run_bot};
