//! Per-user record: activation flag, current partner, activity and match-wait timestamps.

use chrono::{DateTime, Utc};

use super::preferences::Preferences;

/// Opaque platform user id. In private chats it doubles as the destination chat id.
pub type UserId = i64;

/// Where a user sits in the session lifecycle, derived from the record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Waiting,
    Paired,
}

/// Persistent profile and session fields for one user.
///
/// `current_partner` and `match_wait_start` are mutually exclusive; the partner relation is symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub user_id: UserId,
    /// Opted in to be matched.
    pub active: bool,
    pub current_partner: Option<UserId>,
    pub last_activity: DateTime<Utc>,
    pub preferences: Preferences,
    pub match_wait_start: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Default record for a user seen for the first time: inactive, unpaired, no preferences.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            active: false,
            current_partner: None,
            last_activity: Utc::now(),
            preferences: Preferences::default(),
            match_wait_start: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.current_partner.is_some() {
            SessionState::Paired
        } else if self.match_wait_start.is_some() {
            SessionState::Waiting
        } else {
            SessionState::Idle
        }
    }

    pub fn is_paired(&self) -> bool {
        self.current_partner.is_some()
    }

    /// Active and unpaired: may be returned as a matchmaking candidate.
    pub fn is_match_candidate(&self) -> bool {
        self.active && self.current_partner.is_none()
    }

    /// Links this user to `partner`, stamping activity and clearing the wait window.
    pub fn pair_with(&mut self, partner: UserId, now: DateTime<Utc>) {
        self.current_partner = Some(partner);
        self.match_wait_start = None;
        self.last_activity = now;
    }

    /// Clears the partner link. Returns the former partner, if any.
    pub fn unpair(&mut self) -> Option<UserId> {
        self.current_partner.take()
    }
}
