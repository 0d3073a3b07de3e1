//! Error types for the chat core.
//!
//! [`ChatError`] is the top-level error shared by the store, relay and session layers.

use std::time::Duration;

use thiserror::Error;

/// Top-level error for the chat bot (store, transport, config, IO).
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Send timed out after {0:?}")]
    Timeout(Duration),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`ChatError`].
pub type Result<T> = std::result::Result<T, ChatError>;
