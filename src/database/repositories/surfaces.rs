//! Surface registration repository implementation
//!
//! Append-only: a surface is registered once and tracked for the lifetime of
//! the match. Duplicate handles fall into the unique indexes and are dropped.

use chrono::Utc;
use sqlx::PgPool;

use crate::models::{MatchSurface, SurfaceHandle};
use crate::utils::errors::MatchdayError;

#[derive(Debug, Clone)]
pub struct SurfaceRepository {
    pool: PgPool,
}

impl SurfaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a surface for a match; a no-op when the handle is already known
    pub async fn create(
        &self,
        match_id: i64,
        handle: &SurfaceHandle,
    ) -> Result<(), MatchdayError> {
        let (chat_id, message_id, inline_message_id) = handle.into_columns();

        sqlx::query(
            r#"
            INSERT INTO match_surfaces (match_id, chat_id, message_id, inline_message_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(match_id)
        .bind(chat_id)
        .bind(message_id)
        .bind(inline_message_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All surfaces registered for the match, in registration order
    pub async fn list_for_match(&self, match_id: i64) -> Result<Vec<MatchSurface>, MatchdayError> {
        let rows = sqlx::query_as::<_, MatchSurface>(
            r#"
            SELECT id, match_id, chat_id, message_id, inline_message_id, created_at
            FROM match_surfaces
            WHERE match_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
