//! Surface models
//!
//! A surface is one rendered, independently addressable copy of a match card:
//! either a regular message in a chat or an inline message created when a user
//! shares the card. Registrations are append-only for the lifetime of the
//! match, unique per handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Address of one rendered match card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceHandle {
    /// A regular message in a chat.
    ChatMessage { chat_id: i64, message_id: i32 },
    /// An inline message, addressed by its global instance id.
    Inline { inline_message_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchSurface {
    pub id: i64,
    pub match_id: i64,
    pub chat_id: Option<i64>,
    pub message_id: Option<i32>,
    pub inline_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MatchSurface {
    /// Reconstruct the handle from the row columns. Rows written through
    /// [`SurfaceHandle::into_columns`] always map back to a handle; a row with
    /// neither address is skipped by callers.
    pub fn handle(&self) -> Option<SurfaceHandle> {
        if let Some(inline_message_id) = &self.inline_message_id {
            return Some(SurfaceHandle::Inline {
                inline_message_id: inline_message_id.clone(),
            });
        }
        match (self.chat_id, self.message_id) {
            (Some(chat_id), Some(message_id)) => {
                Some(SurfaceHandle::ChatMessage { chat_id, message_id })
            }
            _ => None,
        }
    }
}

impl SurfaceHandle {
    /// Split the handle into its storage columns:
    /// (chat_id, message_id, inline_message_id).
    pub fn into_columns(&self) -> (Option<i64>, Option<i32>, Option<String>) {
        match self {
            SurfaceHandle::ChatMessage { chat_id, message_id } => {
                (Some(*chat_id), Some(*message_id), None)
            }
            SurfaceHandle::Inline { inline_message_id } => {
                (None, None, Some(inline_message_id.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_round_trip_through_columns() {
        let handles = [
            SurfaceHandle::ChatMessage { chat_id: -100123, message_id: 42 },
            SurfaceHandle::Inline { inline_message_id: "AAA111".to_string() },
        ];
        for handle in handles {
            let (chat_id, message_id, inline_message_id) = handle.into_columns();
            let row = MatchSurface {
                id: 1,
                match_id: 7,
                chat_id,
                message_id,
                inline_message_id,
                created_at: Utc::now(),
            };
            assert_eq!(row.handle(), Some(handle));
        }
    }
}
