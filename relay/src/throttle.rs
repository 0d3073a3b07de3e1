//! Global send throttle: a token bucket holding a single token.

use std::num::NonZeroU32;

use anon_core::{ChatError, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Permits at most `rate` sends per second across all destinations, with no burst.
pub struct SendThrottle {
    limiter: DefaultDirectRateLimiter,
    rate: NonZeroU32,
}

impl SendThrottle {
    pub fn per_second(rate: u32) -> Result<Self> {
        let rate = NonZeroU32::new(rate)
            .ok_or_else(|| ChatError::Config("message rate limit must be > 0".to_string()))?;
        let quota = Quota::per_second(rate).allow_burst(NonZeroU32::MIN);
        Ok(Self {
            limiter: RateLimiter::direct(quota),
            rate,
        })
    }

    /// Waits until the next send is permitted.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    pub fn rate(&self) -> u32 {
        self.rate.get()
    }
}
