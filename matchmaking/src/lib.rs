//! # matchmaking
//!
//! Pairs anonymous users and drives their session lifecycle.
//!
//! - [`is_compatible`] – pure preference check
//! - [`MatchEngine`] – picks a compatible partner from the waiting pool, tracks the wait window
//! - [`SessionManager`] – inbound contract (start, toggle, request match, end, relay, preferences)
//!   and the inactivity sweep; every outbound effect is enqueued on the relay queue

mod compat;
mod engine;
mod locks;
pub mod notices;
mod session;

pub use compat::is_compatible;
pub use engine::{MatchEngine, MatchResult, Selection};
pub use locks::{UserGuard, UserLocks};
pub use session::{EndOutcome, MatchRequestOutcome, RelayOutcome, SessionManager};
