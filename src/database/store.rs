//! Repository contract
//!
//! The storage boundary every service talks through. The Postgres
//! implementation lives in [`crate::database::service::DatabaseService`];
//! tests and local runs use [`crate::database::memory::MemoryStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Attendee, AttendanceUpsert, Match, MatchSurface, NewMatch, ParticipantKey, SurfaceHandle,
};
use crate::utils::errors::Result;

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Persist a new match with an empty ledger.
    async fn create_match(&self, new_match: NewMatch) -> Result<Match>;

    /// Fetch a match by id with no visibility filter. Used by the button
    /// callback path, where holding the button implies the card was shared
    /// with the requester.
    async fn get_match(&self, id: i64) -> Result<Option<Match>>;

    /// Fetch a match by id, visible only to its creator and to holders of an
    /// attendance record, and only while scheduled after `after`.
    async fn find_visible(
        &self,
        id: i64,
        requester_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Option<Match>>;

    /// All matches visible to the requester scheduled after `after`.
    async fn list_visible(&self, requester_id: i64, after: DateTime<Utc>) -> Result<Vec<Match>>;

    /// The most recent match created in the given chat, if any. Backs the
    /// chat-scoped commands (/status, /in, /out, /maybe).
    async fn latest_for_chat(&self, chat_id: i64) -> Result<Option<Match>>;

    /// Insert or replace the participant's attendance record.
    async fn upsert_attendance(&self, upsert: AttendanceUpsert) -> Result<Attendee>;

    /// Delete the participant's attendance record. Returns whether a record
    /// existed.
    async fn delete_attendance(&self, match_id: i64, key: &ParticipantKey) -> Result<bool>;

    /// All attendance records for the match, in join order.
    async fn list_attendance(&self, match_id: i64) -> Result<Vec<Attendee>>;

    /// Register a rendered surface for the match. Re-registering an already
    /// known handle is a no-op.
    async fn create_surface(&self, match_id: i64, handle: &SurfaceHandle) -> Result<()>;

    /// All surfaces registered for the match, in registration order.
    async fn list_surfaces(&self, match_id: i64) -> Result<Vec<MatchSurface>>;
}
