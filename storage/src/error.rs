//! Storage error types.
//!
//! Used by store implementations and surfaced to callers as a failed operation.

use anon_core::ChatError;
use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

impl From<StorageError> for ChatError {
    fn from(e: StorageError) -> Self {
        ChatError::Storage(e.to_string())
    }
}
