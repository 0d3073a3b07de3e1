//! In-memory [`UserStore`]: a `HashMap` behind an async `RwLock`. Used by tests and ephemeral runs.

use std::collections::HashMap;

use anon_core::{UserId, UserRecord};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::user_store::UserStore;

#[derive(Default)]
pub struct InMemoryUserStore {
    records: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, user_id: UserId) -> Result<UserRecord, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UserRecord::new(user_id)))
    }

    async fn put(&self, record: &UserRecord) -> Result<(), StorageError> {
        self.records
            .write()
            .await
            .insert(record.user_id, record.clone());
        Ok(())
    }

    async fn put_many(&self, records: &[UserRecord]) -> Result<(), StorageError> {
        let mut guard = self.records.write().await;
        for record in records {
            guard.insert(record.user_id, record.clone());
        }
        Ok(())
    }

    async fn find_candidates(&self, exclude: UserId) -> Result<Vec<UserRecord>, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.user_id != exclude && r.is_match_candidate())
            .cloned()
            .collect())
    }

    async fn find_paired(&self) -> Result<Vec<UserRecord>, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.is_paired())
            .cloned()
            .collect())
    }

    async fn count_active(&self) -> Result<i64, StorageError> {
        Ok(self.records.read().await.values().filter(|r| r.active).count() as i64)
    }
}
