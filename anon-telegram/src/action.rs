//! Callback data carried by inline keyboard buttons.

use std::str::FromStr;

use anon_core::PreferenceDimension;

/// Parsed button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ShowActive,
    ToggleActive,
    Settings,
    BackToMain,
    FindMatch,
    /// Open the editor for a dimension (country prompt or a picker).
    Edit(PreferenceDimension),
    Clear(PreferenceDimension),
    /// A picker choice, already capitalized for storage.
    Choose(PreferenceDimension, String),
}

impl MenuAction {
    /// Callback data for this action; inverse of parsing.
    pub fn data(&self) -> String {
        match self {
            Self::ShowActive => "show_active".to_string(),
            Self::ToggleActive => "toggle_active".to_string(),
            Self::Settings => "settings".to_string(),
            Self::BackToMain => "back_to_main".to_string(),
            Self::FindMatch => "find_match".to_string(),
            Self::Edit(dim) => format!("set_{}", dim),
            Self::Clear(dim) => format!("clear_{}", dim),
            Self::Choose(PreferenceDimension::Language, value) => {
                format!("lang_{}", value.to_lowercase())
            }
            Self::Choose(dim, value) => format!("{}_{}", dim, value.to_lowercase()),
        }
    }
}

impl FromStr for MenuAction {
    type Err = String;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let action = match data {
            "show_active" => Self::ShowActive,
            "toggle_active" => Self::ToggleActive,
            "settings" => Self::Settings,
            "back_to_main" => Self::BackToMain,
            "find_match" => Self::FindMatch,
            _ => {
                if let Some(dim) = data.strip_prefix("set_") {
                    Self::Edit(dim.parse()?)
                } else if let Some(dim) = data.strip_prefix("clear_") {
                    Self::Clear(dim.parse()?)
                } else if let Some(value) = data.strip_prefix("lang_") {
                    Self::Choose(PreferenceDimension::Language, capitalize(value)?)
                } else if let Some(value) = data.strip_prefix("gender_") {
                    Self::Choose(PreferenceDimension::Gender, capitalize(value)?)
                } else {
                    return Err(format!("unknown callback data: {}", data));
                }
            }
        };
        Ok(action)
    }
}

fn capitalize(value: &str) -> Result<String, String> {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
        None => Err("empty choice".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_actions() {
        assert_eq!("find_match".parse(), Ok(MenuAction::FindMatch));
        assert_eq!("back_to_main".parse(), Ok(MenuAction::BackToMain));
        assert_eq!(
            "set_country".parse(),
            Ok(MenuAction::Edit(PreferenceDimension::Country))
        );
        assert_eq!(
            "clear_gender".parse(),
            Ok(MenuAction::Clear(PreferenceDimension::Gender))
        );
    }

    #[test]
    fn test_parse_choice_capitalizes() {
        assert_eq!(
            "lang_portuguese".parse(),
            Ok(MenuAction::Choose(
                PreferenceDimension::Language,
                "Portuguese".to_string()
            ))
        );
        assert_eq!(
            "gender_other".parse(),
            Ok(MenuAction::Choose(PreferenceDimension::Gender, "Other".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("set_age".parse::<MenuAction>().is_err());
        assert!("lang_".parse::<MenuAction>().is_err());
        assert!("whatever".parse::<MenuAction>().is_err());
    }

    #[test]
    fn test_data_parses_back() {
        let actions = [
            MenuAction::ToggleActive,
            MenuAction::Edit(PreferenceDimension::Language),
            MenuAction::Clear(PreferenceDimension::Country),
            MenuAction::Choose(PreferenceDimension::Language, "English".to_string()),
            MenuAction::Choose(PreferenceDimension::Gender, "Female".to_string()),
        ];
        for action in actions {
            assert_eq!(action.data().parse(), Ok(action));
        }
    }
}
