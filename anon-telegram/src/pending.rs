//! Users whose next text message is a preference value rather than chat content.

use anon_core::{PreferenceDimension, UserId};
use dashmap::DashMap;

#[derive(Default)]
pub struct PendingInput {
    awaiting: DashMap<UserId, PreferenceDimension>,
}

impl PendingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(&self, user_id: UserId, dimension: PreferenceDimension) {
        self.awaiting.insert(user_id, dimension);
    }

    /// Removes and returns the pending dimension for `user_id`.
    pub fn take(&self, user_id: UserId) -> Option<PreferenceDimension> {
        self.awaiting.remove(&user_id).map(|(_, dim)| dim)
    }

    pub fn cancel(&self, user_id: UserId) {
        self.awaiting.remove(&user_id);
    }
}
