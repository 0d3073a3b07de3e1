//! Outbound delivery units consumed by the relay dispatcher.

use super::menu::Menu;
use super::user::UserId;

/// What to deliver: text (optionally with a menu keyboard) or a photo by file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text {
        text: String,
        menu: Option<Menu>,
    },
    Photo {
        file_id: String,
        caption: Option<String>,
    },
}

/// One queued send: a destination and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub destination: UserId,
    pub payload: Payload,
}

impl Outbound {
    pub fn text(destination: UserId, text: impl Into<String>) -> Self {
        Self {
            destination,
            payload: Payload::Text {
                text: text.into(),
                menu: None,
            },
        }
    }

    pub fn menu(destination: UserId, text: impl Into<String>, menu: Menu) -> Self {
        Self {
            destination,
            payload: Payload::Text {
                text: text.into(),
                menu: Some(menu),
            },
        }
    }

    pub fn photo(destination: UserId, file_id: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            destination,
            payload: Payload::Photo {
                file_id: file_id.into(),
                caption,
            },
        }
    }

    /// Text body or photo caption, for assertions and logs.
    pub fn text_content(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text { text, .. } => Some(text),
            Payload::Photo { caption, .. } => caption.as_deref(),
        }
    }
}
