//! `users` table row and its mapping to [`UserRecord`].
//!
//! Columns: `user_id, is_active, current_chat, last_activity, country, language, gender,
//! match_wait_start`. Timestamps are ISO-8601 strings. Rows written by the earlier deployment use
//! `current_chat = 0` and empty strings for "unset"; both read back as `None`.

use anon_core::{Preferences, UserRecord};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub is_active: bool,
    pub current_chat: Option<i64>,
    pub last_activity: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub gender: Option<String>,
    pub match_wait_start: Option<String>,
}

impl UserRow {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            user_id: record.user_id,
            is_active: record.active,
            current_chat: record.current_partner,
            last_activity: Some(format_timestamp(&record.last_activity)),
            country: record.preferences.country.clone(),
            language: record.preferences.language.clone(),
            gender: record.preferences.gender.clone(),
            match_wait_start: record.match_wait_start.as_ref().map(format_timestamp),
        }
    }

    pub fn into_record(self) -> UserRecord {
        let last_activity = match self.last_activity.as_deref().map(parse_timestamp) {
            Some(Some(t)) => t,
            Some(None) => {
                warn!(
                    user_id = self.user_id,
                    last_activity = ?self.last_activity,
                    "Unparseable last_activity, using now"
                );
                Utc::now()
            }
            None => Utc::now(),
        };

        UserRecord {
            user_id: self.user_id,
            active: self.is_active,
            current_partner: self.current_chat.filter(|&id| id != 0),
            last_activity,
            preferences: Preferences {
                country: non_blank(self.country),
                language: non_blank(self.language),
                gender: non_blank(self.gender),
            },
            match_wait_start: self.match_wait_start.as_deref().and_then(parse_timestamp),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// RFC 3339 in UTC with microseconds, e.g. `2026-10-16T08:30:00.000000Z`.
pub(crate) fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses RFC 3339, falling back to offset-less ISO-8601 interpreted as local time.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
}
