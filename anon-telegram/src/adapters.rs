//! Adapters from teloxide messages to core inbound types.

use anon_core::{InboundContent, MediaKind, UserId};
use teloxide::types::Message;

/// Platform id of the sender, if the message has one.
pub fn sender_id(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|u| u.id.0 as i64)
}

/// Classifies a message. Photos carry the largest size; unsupported media maps to
/// [`InboundContent::Media`]. Returns `None` for updates with nothing to relay or reject
/// (service messages, locations, polls).
pub fn inbound_content(msg: &Message) -> Option<InboundContent> {
    if let Some(text) = msg.text() {
        return Some(InboundContent::Text(text.to_string()));
    }
    if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
        return Some(InboundContent::Photo {
            file_id: largest.file.id.0.clone(),
            caption: msg.caption().map(str::to_string),
        });
    }
    media_kind(msg).map(InboundContent::Media)
}

fn media_kind(msg: &Message) -> Option<MediaKind> {
    if msg.video().is_some() {
        Some(MediaKind::Video)
    } else if msg.document().is_some() {
        Some(MediaKind::Document)
    } else if msg.audio().is_some() {
        Some(MediaKind::Audio)
    } else if msg.voice().is_some() {
        Some(MediaKind::Voice)
    } else if msg.sticker().is_some() {
        Some(MediaKind::Sticker)
    } else if msg.video_note().is_some() {
        Some(MediaKind::VideoNote)
    } else {
        None
    }
}
