//! Matching preferences: country, language, gender.

use std::fmt;
use std::str::FromStr;

/// One of the three preference dimensions a user can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceDimension {
    Country,
    Language,
    Gender,
}

impl PreferenceDimension {
    pub const ALL: [PreferenceDimension; 3] = [Self::Gender, Self::Language, Self::Country];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Language => "language",
            Self::Gender => "gender",
        }
    }

    /// Label shown in menus ("Country", "Language", "Gender").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Language => "Language",
            Self::Gender => "Gender",
        }
    }
}

impl fmt::Display for PreferenceDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(Self::Country),
            "language" => Ok(Self::Language),
            "gender" => Ok(Self::Gender),
            other => Err(format!("unknown preference dimension: {}", other)),
        }
    }
}

/// Optional per-dimension values. `None` (or blank) imposes no matching constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub country: Option<String>,
    pub language: Option<String>,
    pub gender: Option<String>,
}

impl Preferences {
    /// Returns the value for `dimension` if it is set and non-blank.
    pub fn get(&self, dimension: PreferenceDimension) -> Option<&str> {
        let value = match dimension {
            PreferenceDimension::Country => &self.country,
            PreferenceDimension::Language => &self.language,
            PreferenceDimension::Gender => &self.gender,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// Sets `dimension`; a blank value clears it.
    pub fn set(&mut self, dimension: PreferenceDimension, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        match dimension {
            PreferenceDimension::Country => self.country = value,
            PreferenceDimension::Language => self.language = value,
            PreferenceDimension::Gender => self.gender = value,
        }
    }

    pub fn clear(&mut self, dimension: PreferenceDimension) {
        self.set(dimension, None);
    }
}
