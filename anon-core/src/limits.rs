//! Tunable timing constants shared by matchmaking, the inactivity sweep and the relay throttle.

use std::time::Duration;

/// Seconds a paired session may stay silent before the sweep ends it.
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 3600;
/// Seconds a user may wait for a partner before `find_match` reports a timeout.
pub const DEFAULT_MATCH_TIMEOUT_SECS: u64 = 120;
/// Outbound messages per second across all destinations.
pub const DEFAULT_MESSAGE_RATE_LIMIT: u32 = 30;

/// Timeouts and the outbound rate. `Default` yields the production values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLimits {
    pub inactivity_timeout: Duration,
    pub match_timeout: Duration,
    pub message_rate_limit: u32,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_TIMEOUT_SECS),
            match_timeout: Duration::from_secs(DEFAULT_MATCH_TIMEOUT_SECS),
            message_rate_limit: DEFAULT_MESSAGE_RATE_LIMIT,
        }
    }
}

impl ChatLimits {
    /// Inactivity timeout as a chrono duration, for comparing against record timestamps.
    pub fn inactivity_timeout_chrono(&self) -> chrono::Duration {
        to_chrono(self.inactivity_timeout)
    }

    /// Match timeout as a chrono duration.
    pub fn match_timeout_chrono(&self) -> chrono::Duration {
        to_chrono(self.match_timeout)
    }
}

fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}
