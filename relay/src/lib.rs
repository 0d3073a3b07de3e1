//! # relay
//!
//! Outbound delivery for the chat bot. Every send goes through one ordered queue drained by a
//! single worker ([`RelayDispatcher`]) at a global rate ([`SendThrottle`]). Before each dequeue
//! attempt the worker runs a [`Sweeper`] (the inactivity sweep). Producers hold a cloneable
//! [`RelayQueue`]; enqueue never blocks.

mod dispatcher;
mod queue;
mod sweep;
mod throttle;

pub use dispatcher::{DispatchReport, DispatcherConfig, RelayDispatcher};
pub use queue::{relay_channel, RelayQueue, RelayReceiver};
pub use sweep::Sweeper;
pub use throttle::SendThrottle;
