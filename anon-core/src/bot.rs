//! Transport abstraction for outbound delivery.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in anon-telegram.
//! Only the relay dispatcher holds a `Bot` and calls these methods.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Menu, UserId};

/// Outbound send primitives, one per payload kind.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message, rendering `menu` as the transport's keyboard if given.
    async fn send_message(&self, chat_id: UserId, text: &str, menu: Option<&Menu>) -> Result<()>;
    /// Sends a photo by platform file reference with an optional caption.
    async fn send_photo(&self, chat_id: UserId, file_id: &str, caption: Option<&str>) -> Result<()>;
}
