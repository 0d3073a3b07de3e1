//! Menus attached to outbound text. Rendering (e.g. inline keyboards) belongs to the transport.

use super::preferences::{PreferenceDimension, Preferences};

/// Interactive menu shown beneath a text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    /// Active-users / status toggle / settings / find match.
    Main { is_active: bool },
    /// Current preference values with set and clear actions.
    Settings(Preferences),
    LanguagePicker,
    GenderPicker,
    /// Single "back to settings" action, shown while waiting for free-text input.
    AwaitingInput(PreferenceDimension),
}
