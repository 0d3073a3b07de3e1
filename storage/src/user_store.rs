//! Store boundary: get/put per-user records plus the scans matchmaking and the sweep need.

use anon_core::{UserId, UserRecord};
use async_trait::async_trait;

use crate::error::StorageError;

/// Durable mapping from user id to [`UserRecord`]. Implementations must support concurrent callers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns the stored record, or a default record (not persisted) if the user is unknown.
    async fn get(&self, user_id: UserId) -> Result<UserRecord, StorageError>;

    /// Inserts or replaces one record.
    async fn put(&self, record: &UserRecord) -> Result<(), StorageError>;

    /// Writes several records atomically: either all are persisted or none.
    async fn put_many(&self, records: &[UserRecord]) -> Result<(), StorageError>;

    /// Records with `active` set, no partner, and an id other than `exclude`.
    async fn find_candidates(&self, exclude: UserId) -> Result<Vec<UserRecord>, StorageError>;

    /// Every record that currently has a partner.
    async fn find_paired(&self) -> Result<Vec<UserRecord>, StorageError>;

    /// Number of users with `active` set.
    async fn count_active(&self) -> Result<i64, StorageError>;
}
