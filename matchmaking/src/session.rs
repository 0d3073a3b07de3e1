//! Session Manager: the inbound contract and the session lifecycle.
//!
//! State per user is derived from the stored record: Idle (no partner, no wait), Waiting (wait
//! window open), Paired (partner set). Transitions that touch two users run under the pairing
//! mutex plus both user locks; single-user updates take only that user's lock. Every
//! user-visible effect is enqueued on the [`RelayQueue`], never sent directly.

use std::collections::HashSet;
use std::sync::Arc;

use anon_core::{
    ChatLimits, InboundContent, MediaKind, Outbound, PreferenceDimension, Preferences, Result,
    UserId, UserRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay::{RelayQueue, Sweeper};
use storage::UserStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::engine::{MatchEngine, MatchResult, Selection};
use crate::locks::{UserGuard, UserLocks};
use crate::notices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRequestOutcome {
    Paired { partner: UserId },
    StillWaiting,
    TimedOut,
    NotActive,
    AlreadyPaired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    Ended { partner: UserId },
    NotInChat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Relayed { partner: UserId },
    Rejected(MediaKind),
    /// Sender has no partner; nothing was enqueued.
    NotInChat,
}

pub struct SessionManager {
    store: Arc<dyn UserStore>,
    engine: MatchEngine,
    queue: RelayQueue,
    locks: Arc<UserLocks>,
    pairing: Mutex<()>,
    limits: ChatLimits,
}

impl SessionManager {
    pub fn new(store: Arc<dyn UserStore>, queue: RelayQueue, limits: ChatLimits) -> Self {
        let locks = Arc::new(UserLocks::new());
        let engine = MatchEngine::new(store.clone(), locks.clone(), limits);
        Self {
            store,
            engine,
            queue,
            locks,
            pairing: Mutex::new(()),
            limits,
        }
    }

    /// Current record for `user_id` (default if unknown).
    pub async fn user(&self, user_id: UserId) -> Result<UserRecord> {
        Ok(self.store.get(user_id).await?)
    }

    /// First contact or /start: persists the record if new and enqueues the welcome text.
    pub async fn on_start(&self, user_id: UserId) -> Result<UserRecord> {
        let _guard = self.locks.lock(user_id).await;
        let record = self.store.get(user_id).await?;
        self.store.put(&record).await?;
        self.queue.text(user_id, notices::WELCOME);
        debug!(user_id, "User started");
        Ok(record)
    }

    /// Flips the activation flag and returns the new value. Partner state is untouched.
    pub async fn on_toggle_active(&self, user_id: UserId) -> Result<bool> {
        let _guard = self.locks.lock(user_id).await;
        let mut record = self.store.get(user_id).await?;
        record.active = !record.active;
        self.store.put(&record).await?;
        info!(user_id, active = record.active, "Activation toggled");
        Ok(record.active)
    }

    pub async fn on_request_match(&self, user_id: UserId) -> Result<MatchRequestOutcome> {
        let _pairing = self.pairing.lock().await;
        let _guard = self.locks.lock(user_id).await;

        let record = self.store.get(user_id).await?;
        if record.is_paired() {
            self.queue.text(user_id, notices::ALREADY_IN_CHAT);
            return Ok(MatchRequestOutcome::AlreadyPaired);
        }
        if !record.active {
            self.queue.text(user_id, notices::NOT_ACTIVE);
            return Ok(MatchRequestOutcome::NotActive);
        }

        let Selection {
            result,
            partner_guard,
        } = self.engine.select(user_id).await?;
        match result {
            MatchResult::Paired(partner) => {
                let partner_guard = match partner_guard {
                    Some(guard) => guard,
                    None => self.locks.lock(partner).await,
                };
                self.start_session(user_id, partner, partner_guard).await?;
                Ok(MatchRequestOutcome::Paired { partner })
            }
            MatchResult::StillWaiting => {
                self.queue.text(user_id, notices::STILL_WAITING);
                Ok(MatchRequestOutcome::StillWaiting)
            }
            MatchResult::TimedOut => {
                self.queue.text(user_id, notices::MATCH_TIMED_OUT);
                Ok(MatchRequestOutcome::TimedOut)
            }
        }
    }

    /// Links a selected pair. The caller holds the requester's lock and hands over the partner's.
    async fn start_session(
        &self,
        requester: UserId,
        partner: UserId,
        _partner_guard: UserGuard,
    ) -> Result<()> {
        let now = Utc::now();
        let mut me = self.store.get(requester).await?;
        let mut other = self.store.get(partner).await?;
        me.pair_with(partner, now);
        other.pair_with(requester, now);
        self.store.put_many(&[me, other]).await?;

        self.queue.text(requester, notices::MATCH_FOUND);
        self.queue.text(requester, notices::CHAT_STARTED);
        self.queue.text(partner, notices::CHAT_STARTED);
        info!(user_id = requester, partner_id = partner, "Session started");
        Ok(())
    }

    pub async fn on_end_session(&self, user_id: UserId) -> Result<EndOutcome> {
        let _pairing = self.pairing.lock().await;
        let _guard = self.locks.lock(user_id).await;

        let mut me = self.store.get(user_id).await?;
        let Some(partner) = me.current_partner else {
            self.queue.text(user_id, notices::NOT_IN_CHAT);
            return Ok(EndOutcome::NotInChat);
        };

        me.unpair();
        if partner == user_id {
            self.store.put(&me).await?;
            self.queue.text(user_id, notices::YOU_ENDED);
            return Ok(EndOutcome::Ended { partner });
        }

        let _partner_guard = self.locks.lock(partner).await;
        let mut other = self.store.get(partner).await?;
        let linked = other.current_partner == Some(user_id);
        if linked {
            other.unpair();
            self.store.put_many(&[me, other]).await?;
        } else {
            warn!(user_id, partner_id = partner, "Partner link was one-sided");
            self.store.put(&me).await?;
        }

        self.queue.text(user_id, notices::YOU_ENDED);
        if linked {
            self.queue.text(partner, notices::PARTNER_ENDED);
        }
        info!(user_id, partner_id = partner, "Session ended by user");
        Ok(EndOutcome::Ended { partner })
    }

    /// Relays text or photo to the partner and stamps the sender's activity. Other media is
    /// rejected with a notice to the sender only.
    pub async fn on_incoming_message(
        &self,
        user_id: UserId,
        content: InboundContent,
    ) -> Result<RelayOutcome> {
        let _guard = self.locks.lock(user_id).await;
        let mut me = self.store.get(user_id).await?;
        let Some(partner) = me.current_partner else {
            return Ok(RelayOutcome::NotInChat);
        };

        let relayed = match content {
            InboundContent::Text(text) => Outbound::text(partner, notices::relay_text(&text)),
            InboundContent::Photo { file_id, caption } => {
                let caption = notices::relay_caption(caption.as_deref());
                Outbound::photo(partner, file_id, Some(caption))
            }
            InboundContent::Media(kind) => {
                self.queue.text(user_id, notices::UNSUPPORTED_CONTENT);
                debug!(user_id, kind = %kind, "Rejected unsupported content");
                return Ok(RelayOutcome::Rejected(kind));
            }
        };

        me.last_activity = Utc::now();
        self.store.put(&me).await?;
        self.queue.enqueue(relayed);
        debug!(user_id, partner_id = partner, "Relayed message");
        Ok(RelayOutcome::Relayed { partner })
    }

    pub async fn on_set_preference(
        &self,
        user_id: UserId,
        dimension: PreferenceDimension,
        value: &str,
    ) -> Result<Preferences> {
        self.update_preferences(user_id, |prefs| {
            prefs.set(dimension, Some(value.to_string()))
        })
        .await
    }

    pub async fn on_clear_preference(
        &self,
        user_id: UserId,
        dimension: PreferenceDimension,
    ) -> Result<Preferences> {
        self.update_preferences(user_id, |prefs| prefs.clear(dimension))
            .await
    }

    async fn update_preferences<F>(&self, user_id: UserId, update: F) -> Result<Preferences>
    where
        F: FnOnce(&mut Preferences),
    {
        let _guard = self.locks.lock(user_id).await;
        let mut record = self.store.get(user_id).await?;
        update(&mut record.preferences);
        self.store.put(&record).await?;
        Ok(record.preferences)
    }

    pub async fn active_user_count(&self) -> Result<i64> {
        Ok(self.store.count_active().await?)
    }

    /// Ends every session in which either participant has been idle longer than the inactivity
    /// timeout. Each expired pair is handled once per pass and both users are notified. A pair
    /// whose store write fails is left intact and reported as the pass's error.
    pub async fn expire_inactive(&self) -> Result<usize> {
        let now = Utc::now();
        let cutoff = self.limits.inactivity_timeout_chrono();
        let stale: Vec<UserRecord> = self
            .store
            .find_paired()
            .await?
            .into_iter()
            .filter(|r| now - r.last_activity > cutoff)
            .collect();
        if stale.is_empty() {
            return Ok(0);
        }

        let _pairing = self.pairing.lock().await;
        let mut handled = HashSet::new();
        let mut expired = 0;
        let mut first_error = None;
        for record in stale {
            let Some(partner) = record.current_partner else {
                continue;
            };
            if !handled.insert(record.user_id) || !handled.insert(partner) {
                continue;
            }
            match self.expire_pair(record.user_id, partner, now).await {
                Ok(true) => expired += 1,
                Ok(false) => {}
                Err(e) => {
                    debug!(user_id = record.user_id, partner_id = partner, error = %e, "Expiry failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        // Remaining pairs are still processed; the first failure fails the pass.
        match first_error {
            Some(e) => Err(e),
            None => Ok(expired),
        }
    }

    /// Re-checks the pair under both locks; returns false if it changed since the scan.
    async fn expire_pair(&self, a: UserId, b: UserId, now: DateTime<Utc>) -> Result<bool> {
        let _guards = self.locks.lock_two(a, b).await;
        let cutoff = self.limits.inactivity_timeout_chrono();

        let mut first = self.store.get(a).await?;
        if first.current_partner != Some(b) {
            return Ok(false);
        }
        if a == b {
            first.unpair();
            self.store.put(&first).await?;
            self.queue.text(a, notices::ENDED_INACTIVITY);
            return Ok(true);
        }

        let mut second = self.store.get(b).await?;
        let linked = second.current_partner == Some(a);
        let stale = now - first.last_activity > cutoff
            || (linked && now - second.last_activity > cutoff);
        if !stale {
            return Ok(false);
        }

        first.unpair();
        if linked {
            second.unpair();
            self.store.put_many(&[first, second]).await?;
        } else {
            self.store.put(&first).await?;
        }
        self.queue.text(a, notices::ENDED_INACTIVITY);
        if linked {
            self.queue.text(b, notices::ENDED_INACTIVITY);
        }
        info!(user_id = a, partner_id = b, "Session expired due to inactivity");
        Ok(true)
    }
}

#[async_trait]
impl Sweeper for SessionManager {
    async fn sweep(&self) -> Result<usize> {
        self.expire_inactive().await
    }
}
