//! Shared test doubles for relay integration tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anon_core::{Bot, ChatError, Menu, Result, UserId};
use async_trait::async_trait;
use relay::Sweeper;
use tokio::sync::mpsc;

/// One recorded send.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SentRecord {
    pub chat_id: UserId,
    pub text: Option<String>,
    pub photo: Option<String>,
    pub at: Instant,
}

/// Bot that records every send, optionally failing or stalling for chosen destinations.
pub struct RecordingBot {
    tx: mpsc::UnboundedSender<SentRecord>,
    failing: HashSet<UserId>,
    stalling: HashSet<UserId>,
}

#[allow(dead_code)]
impl RecordingBot {
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        Self::build(HashSet::new(), HashSet::new())
    }

    pub fn failing_for(ids: &[UserId]) -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        Self::build(ids.iter().copied().collect(), HashSet::new())
    }

    pub fn stalling_for(ids: &[UserId]) -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        Self::build(HashSet::new(), ids.iter().copied().collect())
    }

    fn build(
        failing: HashSet<UserId>,
        stalling: HashSet<UserId>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx,
                failing,
                stalling,
            }),
            rx,
        )
    }

    async fn record(&self, chat_id: UserId, text: Option<&str>, photo: Option<&str>) -> Result<()> {
        let at = Instant::now();
        let _ = self.tx.send(SentRecord {
            chat_id,
            text: text.map(str::to_string),
            photo: photo.map(str::to_string),
            at,
        });
        if self.stalling.contains(&chat_id) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if self.failing.contains(&chat_id) {
            return Err(ChatError::Transport("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: UserId, text: &str, _menu: Option<&Menu>) -> Result<()> {
        self.record(chat_id, Some(text), None).await
    }

    async fn send_photo(&self, chat_id: UserId, file_id: &str, caption: Option<&str>) -> Result<()> {
        self.record(chat_id, caption, Some(file_id)).await
    }
}

/// Sweeper that never ends a session.
pub struct NoSweep;

#[async_trait]
impl Sweeper for NoSweep {
    async fn sweep(&self) -> Result<usize> {
        Ok(0)
    }
}

pub fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}
