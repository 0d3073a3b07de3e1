//! # anon-telegram
//!
//! Telegram layer for the anonymous chat bot: [`anon_core::Bot`] implementation over teloxide,
//! inbound adapters, inline keyboards for [`anon_core::Menu`], callback/command parsing, the
//! [`ChatHandler`] routing updates into the session manager, and the update dispatcher.
//! All outbound traffic goes through the relay queue; only callback acknowledgements are sent
//! directly.

mod action;
mod adapters;
mod bot_adapter;
mod command;
mod handler;
pub mod keyboard;
mod pending;
mod runner;

pub use action::MenuAction;
pub use adapters::{inbound_content, sender_id};
pub use bot_adapter::TelegramBotAdapter;
pub use command::Command;
pub use handler::ChatHandler;
pub use pending::PendingInput;
pub use runner::run_dispatcher;
