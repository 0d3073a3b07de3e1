//! Slash commands.

/// A slash command sent as message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    End,
    Unknown(String),
}

impl Command {
    /// Parses `/name`, `/name@BotName` and `/name args`. Returns `None` for non-command text.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix('/')?;
        let word = rest.split_whitespace().next().unwrap_or("");
        let name = word.split('@').next().unwrap_or("");
        if name.is_empty() {
            return None;
        }
        Some(match name.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "end" => Self::End,
            _ => Self::Unknown(name.to_string()),
        })
    }
}
