//! In-memory store
//!
//! A [`MatchStore`] backed by plain collections. Used by the test suite and
//! handy for running the bot without a database. Honors the same invariants as
//! the Postgres store: one record per participant key, surface dedup by
//! handle, join-order retrieval.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::database::store::MatchStore;
use crate::models::{
    Attendee, AttendanceUpsert, Match, MatchSurface, NewMatch, ParticipantKey, SurfaceHandle,
};
use crate::utils::errors::Result;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    matches: Vec<Match>,
    attendees: Vec<Attendee>,
    surfaces: Vec<MatchSurface>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn visible_to(m: &Match, attendees: &[Attendee], requester_id: i64) -> bool {
    m.created_by == requester_id
        || attendees
            .iter()
            .any(|a| a.match_id == m.id && a.user_id == Some(requester_id))
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let row = Match {
            id,
            created_by: new_match.created_by,
            chat_id: new_match.chat_id,
            scheduled_at: new_match.scheduled_at,
            created_at: Utc::now(),
        };
        inner.matches.push(row.clone());
        Ok(row)
    }

    async fn get_match(&self, id: i64) -> Result<Option<Match>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn find_visible(
        &self,
        id: i64,
        requester_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Option<Match>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .matches
            .iter()
            .find(|m| {
                m.id == id
                    && m.scheduled_at > after
                    && visible_to(m, &inner.attendees, requester_id)
            })
            .cloned())
    }

    async fn list_visible(&self, requester_id: i64, after: DateTime<Utc>) -> Result<Vec<Match>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Match> = inner
            .matches
            .iter()
            .filter(|m| m.scheduled_at > after && visible_to(m, &inner.attendees, requester_id))
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.scheduled_at);
        Ok(rows)
    }

    async fn latest_for_chat(&self, chat_id: i64) -> Result<Option<Match>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .matches
            .iter()
            .filter(|m| m.chat_id == Some(chat_id))
            .max_by_key(|m| (m.created_at, m.id))
            .cloned())
    }

    async fn upsert_attendance(&self, upsert: AttendanceUpsert) -> Result<Attendee> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(existing) = inner
            .attendees
            .iter_mut()
            .find(|a| a.match_id == upsert.match_id && a.key() == upsert.key)
        {
            existing.status = upsert.status.as_str().to_string();
            if let ParticipantKey::User(_) = upsert.key {
                existing.display_name = upsert.display_name;
                existing.username = upsert.username;
            }
            return Ok(existing.clone());
        }

        let (user_id, external_name) = match &upsert.key {
            ParticipantKey::User(user_id) => (Some(*user_id), None),
            ParticipantKey::External(name) => (None, Some(name.clone())),
        };
        let id = inner.next_id();
        let row = Attendee {
            id,
            match_id: upsert.match_id,
            user_id,
            external_name,
            display_name: upsert.display_name,
            username: upsert.username,
            status: upsert.status.as_str().to_string(),
            joined_at: Utc::now(),
        };
        inner.attendees.push(row.clone());
        Ok(row)
    }

    async fn delete_attendance(&self, match_id: i64, key: &ParticipantKey) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.attendees.len();
        inner
            .attendees
            .retain(|a| !(a.match_id == match_id && a.key() == *key));
        Ok(inner.attendees.len() < before)
    }

    async fn list_attendance(&self, match_id: i64) -> Result<Vec<Attendee>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Attendee> = inner
            .attendees
            .iter()
            .filter(|a| a.match_id == match_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.joined_at, a.id));
        Ok(rows)
    }

    async fn create_surface(&self, match_id: i64, handle: &SurfaceHandle) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let known = inner
            .surfaces
            .iter()
            .any(|s| s.match_id == match_id && s.handle().as_ref() == Some(handle));
        if known {
            return Ok(());
        }

        let (chat_id, message_id, inline_message_id) = handle.into_columns();
        let id = inner.next_id();
        inner.surfaces.push(MatchSurface {
            id,
            match_id,
            chat_id,
            message_id,
            inline_message_id,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_surfaces(&self, match_id: i64) -> Result<Vec<MatchSurface>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<MatchSurface> = inner
            .surfaces
            .iter()
            .filter(|s| s.match_id == match_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.created_at, s.id));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn future_match(store_now: DateTime<Utc>) -> NewMatch {
        NewMatch {
            created_by: 1,
            chat_id: Some(-100),
            scheduled_at: store_now + Duration::days(1),
        }
    }

    #[tokio::test]
    async fn visibility_covers_creator_and_attendees_only() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let m = store.create_match(future_match(now)).await.unwrap();

        assert!(store.find_visible(m.id, 1, now).await.unwrap().is_some());
        assert!(store.find_visible(m.id, 2, now).await.unwrap().is_none());

        store
            .upsert_attendance(AttendanceUpsert {
                match_id: m.id,
                key: ParticipantKey::User(2),
                display_name: "Ana".to_string(),
                username: None,
                status: crate::models::AttendanceStatus::Maybe,
            })
            .await
            .unwrap();
        assert!(store.find_visible(m.id, 2, now).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn surface_registration_dedupes_by_handle() {
        let store = MemoryStore::new();
        let m = store.create_match(future_match(Utc::now())).await.unwrap();
        let handle = SurfaceHandle::Inline {
            inline_message_id: "abc".to_string(),
        };

        store.create_surface(m.id, &handle).await.unwrap();
        store.create_surface(m.id, &handle).await.unwrap();

        assert_eq!(store.list_surfaces(m.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn latest_for_chat_picks_the_newest() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.create_match(future_match(now)).await.unwrap();
        let second = store.create_match(future_match(now)).await.unwrap();

        let latest = store.latest_for_chat(-100).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert!(store.latest_for_chat(-999).await.unwrap().is_none());
    }
}
