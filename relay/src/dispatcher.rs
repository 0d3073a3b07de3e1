//! The relay worker: sweep, dequeue one item, wait for a send permit, deliver, repeat.
//!
//! Delivery is at-most-once. A failed or timed-out send is logged and dropped, then the worker
//! pauses for the backoff interval. No single-cycle error stops the loop; only cancellation or a
//! closed queue does. An in-flight send is never aborted by cancellation.

use std::sync::Arc;
use std::time::Duration;

use anon_core::{Bot, ChatError, Outbound, Payload, Result};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::queue::RelayReceiver;
use crate::sweep::Sweeper;
use crate::throttle::SendThrottle;

/// Worker timing. Not part of the environment surface.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Sleep when the queue is empty.
    pub idle_poll_interval: Duration,
    /// Upper bound on one transport send.
    pub send_timeout: Duration,
    /// Pause after a failed cycle (sweep error, send error or timeout).
    pub failure_backoff: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            idle_poll_interval: Duration::from_millis(100),
            send_timeout: Duration::from_secs(10),
            failure_backoff: Duration::from_secs(1),
        }
    }
}

/// Counters returned when the worker exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: u64,
    pub failed: u64,
    pub sessions_expired: u64,
    /// Items still queued at shutdown; they are never sent.
    pub dropped: u64,
}

#[derive(Debug, PartialEq, Eq)]
enum Cycle {
    Delivered,
    /// The send failed and was logged; the item is gone.
    Failed,
    Idle,
    Closed,
}

/// Sole caller of the transport's send operations.
pub struct RelayDispatcher {
    bot: Arc<dyn Bot>,
    receiver: RelayReceiver,
    throttle: SendThrottle,
    sweeper: Arc<dyn Sweeper>,
    config: DispatcherConfig,
    report: DispatchReport,
}

impl RelayDispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        receiver: RelayReceiver,
        throttle: SendThrottle,
        sweeper: Arc<dyn Sweeper>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            bot,
            receiver,
            throttle,
            sweeper,
            config,
            report: DispatchReport::default(),
        }
    }

    /// Runs the worker on its own task until `cancel` fires or every queue handle is dropped.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<DispatchReport> {
        tokio::spawn(self.run(cancel))
    }

    /// Runs the worker loop. Cancellation is observed between cycles and during idle or backoff sleeps.
    #[instrument(skip(self, cancel), fields(rate = self.throttle.rate()))]
    pub async fn run(mut self, cancel: CancellationToken) -> DispatchReport {
        info!("Relay dispatcher started");

        while !cancel.is_cancelled() {
            match self.cycle(&cancel).await {
                Ok(Cycle::Delivered) | Ok(Cycle::Idle) => {}
                Ok(Cycle::Failed) => {
                    self.pause(self.config.failure_backoff, &cancel).await;
                }
                Ok(Cycle::Closed) => {
                    info!("Relay queue closed");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Relay cycle failed");
                    self.pause(self.config.failure_backoff, &cancel).await;
                }
            }
        }

        self.report.dropped = self.receiver.drain().len() as u64;
        info!(
            delivered = self.report.delivered,
            failed = self.report.failed,
            sessions_expired = self.report.sessions_expired,
            dropped = self.report.dropped,
            "Relay dispatcher stopped"
        );
        self.report
    }

    async fn cycle(&mut self, cancel: &CancellationToken) -> Result<Cycle> {
        let expired = self.sweeper.sweep().await?;
        if expired > 0 {
            info!(expired, "Inactivity sweep ended sessions");
            self.report.sessions_expired += expired as u64;
        }

        let item = match self.receiver.rx.try_recv() {
            Ok(item) => item,
            Err(TryRecvError::Empty) => {
                self.pause(self.config.idle_poll_interval, cancel).await;
                return Ok(Cycle::Idle);
            }
            Err(TryRecvError::Disconnected) => return Ok(Cycle::Closed),
        };

        self.throttle.acquire().await;

        let destination = item.destination;
        match self.deliver(&item).await {
            Ok(()) => {
                self.report.delivered += 1;
                debug!(destination, "Delivered outbound message");
                Ok(Cycle::Delivered)
            }
            Err(e) => {
                self.report.failed += 1;
                warn!(destination, error = %e, "Outbound message dropped");
                Ok(Cycle::Failed)
            }
        }
    }

    async fn deliver(&self, item: &Outbound) -> Result<()> {
        let send = async {
            match &item.payload {
                Payload::Text { text, menu } => {
                    self.bot
                        .send_message(item.destination, text, menu.as_ref())
                        .await
                }
                Payload::Photo { file_id, caption } => {
                    self.bot
                        .send_photo(item.destination, file_id, caption.as_deref())
                        .await
                }
            }
        };

        tokio::time::timeout(self.config.send_timeout, send)
            .await
            .map_err(|_| ChatError::Timeout(self.config.send_timeout))?
    }

    async fn pause(&self, duration: Duration, cancel: &CancellationToken) {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(duration) => {}
        }
    }
}
