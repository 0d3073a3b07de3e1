//! Shared fixtures for matchmaking integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anon_core::{ChatLimits, Outbound, Payload, Preferences, UserId, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use matchmaking::SessionManager;
use relay::{relay_channel, RelayReceiver};
use storage::{InMemoryUserStore, StorageError, UserStore};

pub struct Harness {
    pub store: Arc<InMemoryUserStore>,
    pub manager: Arc<SessionManager>,
    pub outbox: RelayReceiver,
}

pub fn harness() -> Harness {
    harness_with(ChatLimits::default())
}

pub fn harness_with(limits: ChatLimits) -> Harness {
    let store = Arc::new(InMemoryUserStore::new());
    let (queue, outbox) = relay_channel();
    let manager = Arc::new(SessionManager::new(store.clone(), queue, limits));
    Harness {
        store,
        manager,
        outbox,
    }
}

pub fn prefs(country: Option<&str>, language: Option<&str>, gender: Option<&str>) -> Preferences {
    Preferences {
        country: country.map(str::to_string),
        language: language.map(str::to_string),
        gender: gender.map(str::to_string),
    }
}

/// Stores an active, unpaired user with the given preferences.
pub async fn seed_active(store: &InMemoryUserStore, user_id: UserId, preferences: Preferences) {
    let mut record = UserRecord::new(user_id);
    record.active = true;
    record.preferences = preferences;
    store.put(&record).await.unwrap();
}

/// Stores two users already linked to each other with the given last activity.
pub async fn seed_pair(store: &InMemoryUserStore, a: UserId, b: UserId, last_activity: DateTime<Utc>) {
    let mut first = UserRecord::new(a);
    first.active = true;
    first.pair_with(b, last_activity);
    let mut second = UserRecord::new(b);
    second.active = true;
    second.pair_with(a, last_activity);
    store.put_many(&[first, second]).await.unwrap();
}

/// Texts queued for `user_id`, in order.
pub fn texts_for(items: &[Outbound], user_id: UserId) -> Vec<String> {
    items
        .iter()
        .filter(|o| o.destination == user_id)
        .filter_map(|o| o.text_content().map(str::to_string))
        .collect()
}

pub fn photos_for(items: &[Outbound], user_id: UserId) -> Vec<(String, Option<String>)> {
    items
        .iter()
        .filter(|o| o.destination == user_id)
        .filter_map(|o| match &o.payload {
            Payload::Photo { file_id, caption } => Some((file_id.clone(), caption.clone())),
            _ => None,
        })
        .collect()
}

/// In-memory store whose writes can be switched to fail, leaving the stored records untouched.
#[derive(Default)]
pub struct FailingStore {
    pub inner: InMemoryUserStore,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Database("disk I/O error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn get(&self, user_id: UserId) -> Result<UserRecord, StorageError> {
        self.inner.get(user_id).await
    }

    async fn put(&self, record: &UserRecord) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.put(record).await
    }

    async fn put_many(&self, records: &[UserRecord]) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.put_many(records).await
    }

    async fn find_candidates(&self, exclude: UserId) -> Result<Vec<UserRecord>, StorageError> {
        self.inner.find_candidates(exclude).await
    }

    async fn find_paired(&self) -> Result<Vec<UserRecord>, StorageError> {
        self.inner.find_paired().await
    }

    async fn count_active(&self) -> Result<i64, StorageError> {
        self.inner.count_active().await
    }
}

pub struct FailingHarness {
    pub store: Arc<FailingStore>,
    pub manager: Arc<SessionManager>,
    pub outbox: RelayReceiver,
}

pub fn failing_harness(limits: ChatLimits) -> FailingHarness {
    let store = Arc::new(FailingStore::default());
    let (queue, outbox) = relay_channel();
    let manager = Arc::new(SessionManager::new(store.clone(), queue, limits));
    FailingHarness {
        store,
        manager,
        outbox,
    }
}
