//! Attendance models
//!
//! One attendee row holds the current status of one participant for one match.
//! A participant is either a registered Telegram user or an externally-named
//! player; externals are always "in" and are the only rows ever deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::{MatchdayError, Result};

/// Attendance status domain. Closed: no other values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    In,
    Maybe,
    Out,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::In => "in",
            AttendanceStatus::Maybe => "maybe",
            AttendanceStatus::Out => "out",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(AttendanceStatus::In),
            "maybe" => Some(AttendanceStatus::Maybe),
            "out" => Some(AttendanceStatus::Out),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier of an attendee within one match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantKey {
    /// Registered Telegram user.
    User(i64),
    /// Normalized external name (see [`normalize_external_name`]).
    External(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendee {
    pub id: i64,
    pub match_id: i64,
    pub user_id: Option<i64>,
    pub external_name: Option<String>,
    pub display_name: String,
    pub username: Option<String>,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

impl Attendee {
    pub fn status(&self) -> Option<AttendanceStatus> {
        AttendanceStatus::parse(&self.status)
    }

    pub fn key(&self) -> ParticipantKey {
        match self.user_id {
            Some(user_id) => ParticipantKey::User(user_id),
            None => ParticipantKey::External(self.external_name.clone().unwrap_or_default()),
        }
    }
}

/// Idempotent write of one participant's current status for one match.
/// Replaces any prior status in place; there is no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceUpsert {
    pub match_id: i64,
    pub key: ParticipantKey,
    pub display_name: String,
    pub username: Option<String>,
    pub status: AttendanceStatus,
}

/// Normalize a raw external player name into its participant key form:
/// trimmed, whitespace collapsed, lower-cased, then title-cased per word.
/// Fails with `EmptyName` when nothing remains after trimming.
pub fn normalize_external_name(raw: &str) -> Result<String> {
    let words: Vec<String> = raw
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        return Err(MatchdayError::EmptyName);
    }
    Ok(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn normalization_is_case_and_whitespace_insensitive() {
        for raw in ["john doe", "JOHN DOE", " John  Doe "] {
            assert_eq!(normalize_external_name(raw).unwrap(), "John Doe");
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_matches!(normalize_external_name(""), Err(MatchdayError::EmptyName));
        assert_matches!(normalize_external_name("   "), Err(MatchdayError::EmptyName));
    }

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [AttendanceStatus::In, AttendanceStatus::Maybe, AttendanceStatus::Out] {
            assert_eq!(AttendanceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::parse("attending"), None);
    }
}
