//! Per-user async locks serializing read-modify-write on a user's record.
//!
//! Two-party transitions take the session manager's pairing mutex before any user lock, so at most
//! one task ever waits on a second user lock and lock order cannot cycle.

use std::sync::Arc;

use anon_core::UserId;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<UserId, Arc<Mutex<()>>>;

/// Lock table keyed by user. An entry lives only while some task holds or waits on it.
#[derive(Default)]
pub struct UserLocks {
    locks: Arc<LockMap>,
}

/// Held lock on one user's record. Dropping it unlocks and prunes the entry if no one else wants it.
pub struct UserGuard {
    user_id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl Drop for UserGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters hold a clone of the mutex, so a count of 1 means only the map refers to it.
        self.locks
            .remove_if(&self.user_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Guards for two users; holds one guard when both ids are the same.
pub struct PairGuard {
    _first: UserGuard,
    _second: Option<UserGuard>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, user_id: UserId) -> UserGuard {
        let mutex = self.locks.entry(user_id).or_default().clone();
        let guard = mutex.lock_owned().await;
        UserGuard {
            user_id,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// Locks both users in ascending id order.
    pub async fn lock_two(&self, a: UserId, b: UserId) -> PairGuard {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let first = self.lock(low).await;
        let second = if low == high {
            None
        } else {
            Some(self.lock(high).await)
        };
        PairGuard {
            _first: first,
            _second: second,
        }
    }
}
