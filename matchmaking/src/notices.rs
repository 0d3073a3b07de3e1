//! User-facing texts enqueued by the session layer, and relay formatting.

pub const WELCOME: &str = "Welcome to the Anonymous P2P Chat Bot!

How it works:
- This bot lets you chat anonymously with random users.
- You can set preferences (country, language, gender) to match with similar users.
- Only text and photo messages are allowed.
- Chats are ended automatically after 1 hour of inactivity.

Commands and Features:
/start - Show this message and the main menu.
/end - End your current anonymous chat.
Show Active Users - See how many users are currently online.
Status: Online/Offline - Toggle your availability for matching.
Settings - Set or clear your country, language, or gender preferences.
Find Match - Start searching for a random chat partner.

Use the menu buttons to navigate. Enjoy chatting!";

pub const MATCH_FOUND: &str = "Match found! Starting chat...";
pub const CHAT_STARTED: &str = "Chat started! You can now send messages. Use /end to end the chat.";
pub const STILL_WAITING: &str = "No matches found at the moment. We'll keep looking!";
pub const MATCH_TIMED_OUT: &str = "No match found after waiting too long. Please try again later!";
pub const NOT_ACTIVE: &str = "You need to be active to find a match!";
pub const ALREADY_IN_CHAT: &str = "You are already in a chat!";
pub const NOT_IN_CHAT: &str = "You are not in a chat!";
pub const YOU_ENDED: &str = "Chat ended!";
pub const PARTNER_ENDED: &str = "Your chat partner has ended the conversation.";
pub const ENDED_INACTIVITY: &str = "Chat ended due to inactivity!";
pub const UNSUPPORTED_CONTENT: &str =
    "❌ Unauthorized file type. Only text messages and photos are allowed.";

/// Text as the partner sees it.
pub fn relay_text(text: &str) -> String {
    format!("Anonymous: {}", text)
}

/// Caption attached to a relayed photo.
pub fn relay_caption(caption: Option<&str>) -> String {
    match caption.map(str::trim).filter(|c| !c.is_empty()) {
        Some(caption) => format!("Anonymous: {}", caption),
        None => "Anonymous sent a photo".to_string(),
    }
}

pub fn active_users(count: i64) -> String {
    format!("Active users: {}", count)
}
