//! Match repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{Match, NewMatch};
use crate::utils::errors::MatchdayError;

#[derive(Debug, Clone)]
pub struct MatchRepository {
    pool: PgPool,
}

impl MatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new match
    pub async fn create(&self, new_match: NewMatch) -> Result<Match, MatchdayError> {
        let row = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (created_by, chat_id, scheduled_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_by, chat_id, scheduled_at, created_at
            "#,
        )
        .bind(new_match.created_by)
        .bind(new_match.chat_id)
        .bind(new_match.scheduled_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find match by ID, without any visibility filter
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Match>, MatchdayError> {
        let row = sqlx::query_as::<_, Match>(
            "SELECT id, created_by, chat_id, scheduled_at, created_at FROM matches WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find a match by ID among those visible to the requester: the matches
    /// they created or attend, scheduled after the given instant
    pub async fn find_visible(
        &self,
        id: i64,
        requester_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Option<Match>, MatchdayError> {
        let row = sqlx::query_as::<_, Match>(
            r#"
            SELECT DISTINCT m.id, m.created_by, m.chat_id, m.scheduled_at, m.created_at
            FROM matches m
            LEFT OUTER JOIN attendees a ON a.match_id = m.id
            WHERE m.id = $1
              AND (m.created_by = $2 OR a.user_id = $2)
              AND m.scheduled_at > $3
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .bind(after)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all matches visible to the requester scheduled after the given instant
    pub async fn list_visible(
        &self,
        requester_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Vec<Match>, MatchdayError> {
        let rows = sqlx::query_as::<_, Match>(
            r#"
            SELECT DISTINCT m.id, m.created_by, m.chat_id, m.scheduled_at, m.created_at
            FROM matches m
            LEFT OUTER JOIN attendees a ON a.match_id = m.id
            WHERE (m.created_by = $1 OR a.user_id = $1)
              AND m.scheduled_at > $2
            ORDER BY m.scheduled_at ASC
            "#,
        )
        .bind(requester_id)
        .bind(after)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Most recent match created in the given chat
    pub async fn latest_for_chat(&self, chat_id: i64) -> Result<Option<Match>, MatchdayError> {
        let row = sqlx::query_as::<_, Match>(
            r#"
            SELECT id, created_by, chat_id, scheduled_at, created_at
            FROM matches
            WHERE chat_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
