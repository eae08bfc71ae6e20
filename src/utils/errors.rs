//! Error handling for Matchday
//!
//! This module defines the main error type used throughout the application
//! and the mapping from internal errors to user-facing reply text.

use thiserror::Error;

/// Main error type for the Matchday application
#[derive(Error, Debug)]
pub enum MatchdayError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date is invalid: {0}")]
    InvalidDate(String),

    #[error("Time is invalid: {0}")]
    InvalidTime(String),

    #[error("Time is in the past")]
    PastTime,

    #[error("Participant name is empty")]
    EmptyName,

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: i64 },

    #[error("Attendee not found: {name}")]
    AttendeeNotFound { name: String },

    #[error("Invalid command")]
    InvalidCommand,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Matchday operations
pub type Result<T> = std::result::Result<T, MatchdayError>;

impl MatchdayError {
    /// Whether the error is a validation failure caused by the requester's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MatchdayError::InvalidDate(_)
                | MatchdayError::InvalidTime(_)
                | MatchdayError::PastTime
                | MatchdayError::EmptyName
        )
    }

    /// Reply text shown to the requester.
    ///
    /// Validation failures are reported verbatim, lookups that miss (including
    /// unauthorized access) collapse into a generic not-found message, and
    /// internal failures never leak detail.
    pub fn user_message(&self) -> String {
        match self {
            e if e.is_validation() => e.to_string(),
            MatchdayError::MatchNotFound { .. } => "Match not found".to_string(),
            MatchdayError::AttendeeNotFound { .. } => "Player not found".to_string(),
            MatchdayError::InvalidCommand => "Invalid command".to_string(),
            _ => "Something went wrong, please try again".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_reported_verbatim() {
        let err = MatchdayError::InvalidDate("33/13".to_string());
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Date is invalid: 33/13");
    }

    #[test]
    fn internal_errors_stay_generic() {
        let err = MatchdayError::Database(sqlx::Error::PoolClosed);
        assert!(!err.is_validation());
        assert_eq!(err.user_message(), "Something went wrong, please try again");
    }

    #[test]
    fn not_found_never_leaks_detail() {
        let err = MatchdayError::MatchNotFound { match_id: 42 };
        assert_eq!(err.user_message(), "Match not found");
    }
}
