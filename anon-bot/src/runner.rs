//! Wiring: storage, session manager, relay dispatcher and the Telegram update dispatcher.

use std::sync::Arc;

use anon_core::{init_tracing, Bot};
use anon_telegram::{run_dispatcher, ChatHandler, TelegramBotAdapter};
use anyhow::Result;
use matchmaking::SessionManager;
use relay::{relay_channel, DispatcherConfig, RelayDispatcher, SendThrottle};
use storage::{SqliteUserStore, UserStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::config::BotConfig;

/// Main entry: validate config, init logging, open storage, start the relay worker, then run the
/// update dispatcher until Ctrl-C. On shutdown the worker finishes its current cycle and stops.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        inactivity_timeout_secs = config.limits.inactivity_timeout.as_secs(),
        match_timeout_secs = config.limits.match_timeout.as_secs(),
        message_rate_limit = config.limits.message_rate_limit,
        "Initializing bot"
    );

    let store: Arc<dyn UserStore> = Arc::new(
        SqliteUserStore::new(&config.database_url)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url,
                    "Failed to initialize user storage"
                );
                anyhow::anyhow!("Failed to initialize user storage: {}", e)
            })?,
    );

    let (queue, receiver) = relay_channel();
    let sessions = Arc::new(SessionManager::new(store, queue.clone(), config.limits));

    let teloxide_bot = build_teloxide_bot(&config)?;
    let bot_adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let throttle = SendThrottle::per_second(config.limits.message_rate_limit)?;

    let cancel = CancellationToken::new();
    let worker = RelayDispatcher::new(
        bot_adapter,
        receiver,
        throttle,
        sessions.clone(),
        DispatcherConfig::default(),
    )
    .spawn(cancel.clone());

    let handler = Arc::new(ChatHandler::new(sessions, queue));

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, handler).await;

    info!("Shutting down relay dispatcher");
    cancel.cancel();
    let report = worker.await?;
    info!(
        delivered = report.delivered,
        failed = report.failed,
        sessions_expired = report.sessions_expired,
        dropped = report.dropped,
        "Relay dispatcher stopped"
    );
    Ok(())
}

fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Prints active-user and open-session counts for `database_url`.
pub async fn print_stats(database_url: &str) -> Result<()> {
    let store = SqliteUserStore::new(database_url).await?;
    let active = store.count_active().await?;
    let sessions = store.find_paired().await?.len() / 2;
    println!("Active users: {}", active);
    println!("Open sessions: {}", sessions);
    Ok(())
}
