//! Match Engine: selects a compatible, available partner for a requester and tracks the match
//! wait window.

use std::sync::Arc;

use anon_core::{ChatLimits, UserId};
use chrono::Utc;
use rand::seq::SliceRandom;
use storage::{StorageError, UserStore};
use tracing::{debug, info};

use crate::compat::is_compatible;
use crate::locks::{UserGuard, UserLocks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// A partner was selected. Both wait windows are cleared; the caller links the pair.
    Paired(UserId),
    /// No compatible candidate yet; the requester's wait window is open.
    StillWaiting,
    /// The wait window exceeded the match timeout and has been closed.
    TimedOut,
}

/// A match attempt's result plus, when paired, the still-held lock on the selected partner.
pub struct Selection {
    pub result: MatchResult,
    pub partner_guard: Option<UserGuard>,
}

impl From<MatchResult> for Selection {
    fn from(result: MatchResult) -> Self {
        Self {
            result,
            partner_guard: None,
        }
    }
}

pub struct MatchEngine {
    store: Arc<dyn UserStore>,
    locks: Arc<UserLocks>,
    limits: ChatLimits,
}

impl MatchEngine {
    pub fn new(store: Arc<dyn UserStore>, locks: Arc<UserLocks>, limits: ChatLimits) -> Self {
        Self {
            store,
            locks,
            limits,
        }
    }

    /// Runs one match attempt for `requester`.
    ///
    /// Candidates are tried in uniformly random order. Each is re-read under its own lock before
    /// selection, so a user who was paired or deactivated since the scan is skipped. The caller
    /// must hold the requester's lock and the session manager's pairing lock.
    pub async fn find_match(&self, requester: UserId) -> Result<MatchResult, StorageError> {
        Ok(self.select(requester).await?.result)
    }

    /// Same as [`find_match`](Self::find_match), but a paired result keeps the partner's lock so
    /// the caller can link the pair before anyone else updates the partner.
    pub async fn select(&self, requester: UserId) -> Result<Selection, StorageError> {
        let now = Utc::now();
        let mut me = self.store.get(requester).await?;

        if let Some(started) = me.match_wait_start {
            if now - started > self.limits.match_timeout_chrono() {
                me.match_wait_start = None;
                self.store.put(&me).await?;
                info!(user_id = requester, "Match wait timed out");
                return Ok(MatchResult::TimedOut.into());
            }
        }

        let mut candidates = self.store.find_candidates(requester).await?;
        candidates.shuffle(&mut rand::thread_rng());
        debug!(
            user_id = requester,
            candidates = candidates.len(),
            "Scanning match candidates"
        );

        for candidate in candidates {
            if !is_compatible(&me.preferences, &candidate.preferences) {
                continue;
            }
            let guard = self.locks.lock(candidate.user_id).await;
            let mut fresh = self.store.get(candidate.user_id).await?;
            if !fresh.is_match_candidate() || !is_compatible(&me.preferences, &fresh.preferences)
            {
                continue;
            }
            me.match_wait_start = None;
            fresh.match_wait_start = None;
            self.store.put_many(&[me, fresh]).await?;
            info!(
                user_id = requester,
                partner_id = candidate.user_id,
                "Match selected"
            );
            return Ok(Selection {
                result: MatchResult::Paired(candidate.user_id),
                partner_guard: Some(guard),
            });
        }

        if me.match_wait_start.is_none() {
            me.match_wait_start = Some(now);
            self.store.put(&me).await?;
        }
        Ok(MatchResult::StillWaiting.into())
    }
}
