//! Inbound chat content as received from the transport.

use std::fmt;

/// Media kinds that are never relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Document,
    Audio,
    Voice,
    Sticker,
    VideoNote,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Video => "video",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Voice => "voice",
            Self::Sticker => "sticker",
            Self::VideoNote => "video_note",
        };
        f.write_str(name)
    }
}

/// A user's inbound chat message. Only `Text` and `Photo` are relayed to a partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundContent {
    Text(String),
    /// Largest available size of the photo, by platform file reference.
    Photo {
        file_id: String,
        caption: Option<String>,
    },
    Media(MediaKind),
}

impl InboundContent {
    /// Short kind name for logs.
    pub fn kind(&self) -> String {
        match self {
            Self::Text(_) => "text".to_string(),
            Self::Photo { .. } => "photo".to_string(),
            Self::Media(kind) => kind.to_string(),
        }
    }
}
