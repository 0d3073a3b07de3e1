//! # anon-core
//!
//! Core types and traits for the anonymous chat bot: [`UserRecord`], [`Preferences`], inbound
//! content and outbound payloads, the [`Bot`] transport trait, [`ChatLimits`] tunables and
//! tracing initialization. Transport-agnostic; used by storage, relay, matchmaking and anon-telegram.

pub mod bot;
pub mod error;
pub mod limits;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{ChatError, Result};
pub use limits::ChatLimits;
pub use logger::init_tracing;
pub use types::{
    InboundContent, MediaKind, Menu, Outbound, Payload, PreferenceDimension, Preferences,
    SessionState, UserId, UserRecord,
};
