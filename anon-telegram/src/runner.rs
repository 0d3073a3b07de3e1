//! Update dispatcher: messages and callback queries are converted and passed to [`ChatHandler`].
//! Returns when the dispatcher stops (Ctrl-C).

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::{inbound_content, sender_id};
use crate::command::Command;
use crate::handler::ChatHandler;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Runs the long-polling dispatcher until Ctrl-C.
#[instrument(skip(bot, handler))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler: Arc<ChatHandler>) {
    let schema = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Starting update dispatcher");
    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Update dispatcher stopped");
}

async fn on_message(msg: Message, handler: Arc<ChatHandler>) -> HandlerResult {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };
    if !msg.chat.is_private() {
        debug!(user_id, chat_id = msg.chat.id.0, "Ignoring non-private chat");
        return Ok(());
    }

    let result = if let Some(command) = msg.text().and_then(Command::parse) {
        info!(user_id, command = ?command, "Received command");
        handler.handle_command(user_id, command).await
    } else if let Some(content) = inbound_content(&msg) {
        debug!(user_id, kind = %content.kind(), "Received message");
        handler.handle_content(user_id, content).await
    } else {
        Ok(())
    };

    if let Err(e) = result {
        error!(error = %e, user_id, "Failed to handle message");
    }
    Ok(())
}

async fn on_callback(bot: Bot, query: CallbackQuery, handler: Arc<ChatHandler>) -> HandlerResult {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to acknowledge callback query");
    }

    let user_id = query.from.id.0 as i64;
    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    debug!(user_id, data, "Received callback");
    if let Err(e) = handler.handle_callback(user_id, data).await {
        error!(error = %e, user_id, "Failed to handle callback");
    }
    Ok(())
}
