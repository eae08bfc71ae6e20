//! Database service layer
//!
//! Aggregates the sqlx repositories behind the [`MatchStore`] contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::database::connection::DatabasePool;
use crate::database::repositories::{AttendanceRepository, MatchRepository, SurfaceRepository};
use crate::database::store::MatchStore;
use crate::models::{
    Attendee, AttendanceUpsert, Match, MatchSurface, NewMatch, ParticipantKey, SurfaceHandle,
};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub matches: MatchRepository,
    pub attendance: AttendanceRepository,
    pub surfaces: SurfaceRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            matches: MatchRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            surfaces: SurfaceRepository::new(pool),
        }
    }
}

#[async_trait]
impl MatchStore for DatabaseService {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match> {
        self.matches.create(new_match).await
    }

    async fn get_match(&self, id: i64) -> Result<Option<Match>> {
        self.matches.find_by_id(id).await
    }

    async fn find_visible(
        &self,
        id: i64,
        requester_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Option<Match>> {
        self.matches.find_visible(id, requester_id, after).await
    }

    async fn list_visible(&self, requester_id: i64, after: DateTime<Utc>) -> Result<Vec<Match>> {
        self.matches.list_visible(requester_id, after).await
    }

    async fn latest_for_chat(&self, chat_id: i64) -> Result<Option<Match>> {
        self.matches.latest_for_chat(chat_id).await
    }

    async fn upsert_attendance(&self, upsert: AttendanceUpsert) -> Result<Attendee> {
        self.attendance.upsert(upsert).await
    }

    async fn delete_attendance(&self, match_id: i64, key: &ParticipantKey) -> Result<bool> {
        self.attendance.delete(match_id, key).await
    }

    async fn list_attendance(&self, match_id: i64) -> Result<Vec<Attendee>> {
        self.attendance.list_for_match(match_id).await
    }

    async fn create_surface(&self, match_id: i64, handle: &SurfaceHandle) -> Result<()> {
        self.surfaces.create(match_id, handle).await
    }

    async fn list_surfaces(&self, match_id: i64) -> Result<Vec<MatchSurface>> {
        self.surfaces.list_for_match(match_id).await
    }
}
