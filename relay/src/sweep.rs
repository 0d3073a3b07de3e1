//! Hook run by the dispatcher before every dequeue attempt.

use anon_core::Result;
use async_trait::async_trait;

/// Periodic maintenance pass (the inactivity sweep). Returns how many sessions it ended.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sweeper: Send + Sync {
    async fn sweep(&self) -> Result<usize>;
}
