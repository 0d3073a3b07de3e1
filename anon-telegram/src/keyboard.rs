//! Inline keyboards for [`Menu`] and the menu texts they accompany.

use anon_core::{Menu, PreferenceDimension, Preferences};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::action::MenuAction;

pub const MAIN_MENU_TEXT: &str = "Main Menu - Use the buttons below to interact with the bot.";
pub const SETTINGS_TEXT: &str = "Settings Menu - Select an option to change or clear:";
pub const LANGUAGE_PROMPT: &str = "Select your language:";
pub const GENDER_PROMPT: &str = "Select your gender:";
pub const COUNTRY_PROMPT: &str = "Please enter your country (e.g., USA, UK, etc.):";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Use /start to see available options.";

pub const LANGUAGES: [&str; 15] = [
    "English",
    "Mandarin",
    "Hindi",
    "Spanish",
    "French",
    "Arabic",
    "Bengali",
    "Portuguese",
    "Russian",
    "Japanese",
    "German",
    "Korean",
    "Italian",
    "Turkish",
    "Vietnamese",
];

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

fn button(label: impl Into<String>, action: MenuAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.data())
}

pub fn status_label(is_active: bool) -> &'static str {
    if is_active {
        "Status: 🟢 Online"
    } else {
        "Status: 🔴 Offline"
    }
}

/// Renders `menu` as an inline keyboard.
pub fn render(menu: &Menu) -> InlineKeyboardMarkup {
    let rows = match menu {
        Menu::Main { is_active } => vec![
            vec![
                button("Show Active Users", MenuAction::ShowActive),
                button(status_label(*is_active), MenuAction::ToggleActive),
            ],
            vec![
                button("Settings", MenuAction::Settings),
                button("Find Match", MenuAction::FindMatch),
            ],
        ],
        Menu::Settings(prefs) => settings_rows(prefs),
        Menu::LanguagePicker => choice_rows(PreferenceDimension::Language, &LANGUAGES),
        Menu::GenderPicker => choice_rows(PreferenceDimension::Gender, &GENDERS),
        Menu::AwaitingInput(_) => vec![vec![button("Back to Settings", MenuAction::Settings)]],
    };
    InlineKeyboardMarkup::new(rows)
}

fn settings_rows(prefs: &Preferences) -> Vec<Vec<InlineKeyboardButton>> {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = [
        PreferenceDimension::Country,
        PreferenceDimension::Language,
        PreferenceDimension::Gender,
    ]
    .into_iter()
    .map(|dim| {
        let value = prefs.get(dim).unwrap_or("Not set");
        vec![
            button(format!("{}: {}", dim.label(), value), MenuAction::Edit(dim)),
            button("Clear", MenuAction::Clear(dim)),
        ]
    })
    .collect();
    rows.push(vec![button("Back to Main Menu", MenuAction::BackToMain)]);
    rows
}

/// Two choices per row, then a row back to settings.
fn choice_rows(dim: PreferenceDimension, values: &[&str]) -> Vec<Vec<InlineKeyboardButton>> {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = values
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|v| button(*v, MenuAction::Choose(dim, v.to_string())))
                .collect()
        })
        .collect();
    rows.push(vec![button("Back to Settings", MenuAction::Settings)]);
    rows
}
