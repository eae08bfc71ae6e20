//! Match model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled match. Matches are never deleted; time only filters queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: i64,
    pub created_by: i64,
    /// Chat the match was created in, when it was created from a chat message.
    /// Used for the derived "current match for this chat" lookup.
    pub chat_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Short human-readable schedule, e.g. "Sat, 14 Jun 18:30".
    pub fn format_schedule(&self) -> String {
        self.scheduled_at
            .with_timezone(&chrono::Local)
            .format("%a, %d %b %H:%M")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub created_by: i64,
    pub chat_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
}

/// Deterministic status summary of a match: the three attendance groups,
/// each listing display names in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub attending: Vec<String>,
    pub maybe: Vec<String>,
    pub out: Vec<String>,
}

impl MatchSummary {
    /// Partition the current attendance records into the three status groups.
    /// Within a group the input order is preserved, so records listed in join
    /// order stay in join order.
    pub fn from_attendees(m: &Match, attendees: &[crate::models::Attendee]) -> Self {
        let mut summary = MatchSummary {
            match_id: m.id,
            scheduled_at: m.scheduled_at,
            attending: Vec::new(),
            maybe: Vec::new(),
            out: Vec::new(),
        };

        for attendee in attendees {
            let group = match attendee.status() {
                Some(crate::models::AttendanceStatus::In) => &mut summary.attending,
                Some(crate::models::AttendanceStatus::Maybe) => &mut summary.maybe,
                Some(crate::models::AttendanceStatus::Out) => &mut summary.out,
                None => continue,
            };
            group.push(attendee.display_name.clone());
        }

        summary
    }
}
