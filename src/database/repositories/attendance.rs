//! Attendance repository implementation
//!
//! One row per (match, participant key). Upserts replace the status in place;
//! uniqueness is enforced by partial indexes on (match_id, user_id) and
//! (match_id, external_name).

use sqlx::PgPool;
use chrono::Utc;

use crate::models::{Attendee, AttendanceUpsert, ParticipantKey};
use crate::utils::errors::MatchdayError;

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the participant's attendance record
    pub async fn upsert(&self, upsert: AttendanceUpsert) -> Result<Attendee, MatchdayError> {
        let row = match &upsert.key {
            ParticipantKey::User(user_id) => {
                sqlx::query_as::<_, Attendee>(
                    r#"
                    INSERT INTO attendees (match_id, user_id, external_name, display_name, username, status, joined_at)
                    VALUES ($1, $2, NULL, $3, $4, $5, $6)
                    ON CONFLICT (match_id, user_id) WHERE user_id IS NOT NULL
                    DO UPDATE SET status = EXCLUDED.status,
                                  display_name = EXCLUDED.display_name,
                                  username = EXCLUDED.username
                    RETURNING id, match_id, user_id, external_name, display_name, username, status, joined_at
                    "#,
                )
                .bind(upsert.match_id)
                .bind(user_id)
                .bind(&upsert.display_name)
                .bind(&upsert.username)
                .bind(upsert.status.as_str())
                .bind(Utc::now())
                .fetch_one(&self.pool)
                .await?
            }
            ParticipantKey::External(name) => {
                sqlx::query_as::<_, Attendee>(
                    r#"
                    INSERT INTO attendees (match_id, user_id, external_name, display_name, username, status, joined_at)
                    VALUES ($1, NULL, $2, $3, NULL, $4, $5)
                    ON CONFLICT (match_id, external_name) WHERE external_name IS NOT NULL
                    DO UPDATE SET status = EXCLUDED.status
                    RETURNING id, match_id, user_id, external_name, display_name, username, status, joined_at
                    "#,
                )
                .bind(upsert.match_id)
                .bind(name)
                .bind(&upsert.display_name)
                .bind(upsert.status.as_str())
                .bind(Utc::now())
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(row)
    }

    /// Delete the participant's attendance record, reporting whether it existed
    pub async fn delete(
        &self,
        match_id: i64,
        key: &ParticipantKey,
    ) -> Result<bool, MatchdayError> {
        let result = match key {
            ParticipantKey::User(user_id) => {
                sqlx::query("DELETE FROM attendees WHERE match_id = $1 AND user_id = $2")
                    .bind(match_id)
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?
            }
            ParticipantKey::External(name) => {
                sqlx::query("DELETE FROM attendees WHERE match_id = $1 AND external_name = $2")
                    .bind(match_id)
                    .bind(name)
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }

    /// All attendance records for the match, in join order
    pub async fn list_for_match(&self, match_id: i64) -> Result<Vec<Attendee>, MatchdayError> {
        let rows = sqlx::query_as::<_, Attendee>(
            r#"
            SELECT id, match_id, user_id, external_name, display_name, username, status, joined_at
            FROM attendees
            WHERE match_id = $1
            ORDER BY joined_at ASC, id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
