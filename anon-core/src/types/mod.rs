//! Core types: user record, preferences, inbound content, outbound payloads and menus.
//!
//! One file per main type, following the layout used across the workspace.

mod content;
mod menu;
mod outbound;
mod preferences;
mod user;

pub use content::{InboundContent, MediaKind};
pub use menu::Menu;
pub use outbound::{Outbound, Payload};
pub use preferences::{PreferenceDimension, Preferences};
pub use user::{SessionState, UserId, UserRecord};
