//! Producer/consumer halves of the outbound queue.

use anon_core::{Menu, Outbound, UserId};
use tokio::sync::mpsc;
use tracing::warn;

/// Creates the outbound queue. The receiver goes to the [`RelayDispatcher`](crate::RelayDispatcher).
pub fn relay_channel() -> (RelayQueue, RelayReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RelayQueue { tx }, RelayReceiver { rx })
}

/// Cloneable, non-blocking producer handle. Items are delivered in enqueue order.
#[derive(Clone, Debug)]
pub struct RelayQueue {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl RelayQueue {
    /// Enqueues one item. If the dispatcher has already stopped the item is dropped and logged.
    pub fn enqueue(&self, item: Outbound) {
        let destination = item.destination;
        if self.tx.send(item).is_err() {
            warn!(destination, "Relay dispatcher stopped, dropping outbound message");
        }
    }

    pub fn text(&self, destination: UserId, text: impl Into<String>) {
        self.enqueue(Outbound::text(destination, text));
    }

    pub fn menu(&self, destination: UserId, text: impl Into<String>, menu: Menu) {
        self.enqueue(Outbound::menu(destination, text, menu));
    }

    pub fn photo(&self, destination: UserId, file_id: impl Into<String>, caption: Option<String>) {
        self.enqueue(Outbound::photo(destination, file_id, caption));
    }
}

/// Consumer half, owned by the dispatcher.
#[derive(Debug)]
pub struct RelayReceiver {
    pub(crate) rx: mpsc::UnboundedReceiver<Outbound>,
}

impl RelayReceiver {
    /// Takes the next queued item without waiting. Used by tests that inspect the queue directly.
    pub fn try_next(&mut self) -> Option<Outbound> {
        self.rx.try_recv().ok()
    }

    /// Drains every item currently queued.
    pub fn drain(&mut self) -> Vec<Outbound> {
        let mut items = Vec::new();
        while let Ok(item) = self.rx.try_recv() {
            items.push(item);
        }
        items
    }
}
