//! Match service
//!
//! The match aggregate: creation, the attendance ledger and the status
//! summary. Every mutation is an idempotent read-modify-write against the
//! store; there is no per-match lock (see the broadcast notes in DESIGN.md).

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::database::store::MatchStore;
use crate::models::{
    normalize_external_name, AttendanceStatus, AttendanceUpsert, Match, MatchSummary, NewMatch,
    ParticipantKey,
};
use crate::utils::errors::{MatchdayError, Result};
use crate::utils::logging::log_attendance_change;
use crate::utils::time::parse_schedule;

/// The requester's identity as carried on attendance records.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: i64,
    pub display_name: String,
    pub username: Option<String>,
}

impl UserProfile {
    /// Identity of a Telegram user as shown on the card: first plus last name.
    pub fn from_telegram(user: &teloxide::types::User) -> Self {
        let mut display_name = user.first_name.clone();
        if let Some(last_name) = &user.last_name {
            display_name.push(' ');
            display_name.push_str(last_name);
        }
        Self {
            id: user.id.0 as i64,
            display_name,
            username: user.username.clone(),
        }
    }
}

#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn MatchStore>,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Create a match from the free-text date and time tokens.
    #[instrument(skip(self))]
    pub async fn create_match(
        &self,
        created_by: i64,
        chat_id: Option<i64>,
        date: &str,
        time: &str,
    ) -> Result<Match> {
        let scheduled_at = parse_schedule(date, time)?;
        let m = self
            .store
            .create_match(NewMatch {
                created_by,
                chat_id,
                scheduled_at,
            })
            .await?;
        tracing::info!(match_id = m.id, created_by = created_by, "Match created");
        Ok(m)
    }

    /// Fetch a match by id, unrestricted. Used by the button callback path.
    pub async fn get_match(&self, id: i64) -> Result<Match> {
        self.store
            .get_match(id)
            .await?
            .ok_or(MatchdayError::MatchNotFound { match_id: id })
    }

    /// Fetch an upcoming match the requester created or attends. Anything
    /// outside that set answers not-found, never a permission error.
    pub async fn find_visible(&self, id: i64, requester_id: i64) -> Result<Match> {
        self.store
            .find_visible(id, requester_id, Utc::now())
            .await?
            .ok_or(MatchdayError::MatchNotFound { match_id: id })
    }

    /// Upcoming matches the requester created or attends.
    pub async fn list_upcoming(&self, requester_id: i64) -> Result<Vec<Match>> {
        self.store.list_visible(requester_id, Utc::now()).await
    }

    /// The chat's current match: the latest one created in that chat.
    pub async fn current_for_chat(&self, chat_id: i64) -> Result<Match> {
        self.store
            .latest_for_chat(chat_id)
            .await?
            .ok_or(MatchdayError::MatchNotFound { match_id: 0 })
    }

    /// Idempotent upsert of a registered user's attendance.
    pub async fn set_attendance(
        &self,
        match_id: i64,
        user: &UserProfile,
        status: AttendanceStatus,
    ) -> Result<()> {
        self.store
            .upsert_attendance(AttendanceUpsert {
                match_id,
                key: ParticipantKey::User(user.id),
                display_name: user.display_name.clone(),
                username: user.username.clone(),
                status,
            })
            .await?;
        log_attendance_change(match_id, &user.display_name, status.as_str());
        Ok(())
    }

    /// Add an externally-named player. Externals are always "in"; re-adding an
    /// existing name overwrites its status back to "in".
    pub async fn add_external(&self, match_id: i64, raw_name: &str) -> Result<String> {
        let name = normalize_external_name(raw_name)?;
        self.store
            .upsert_attendance(AttendanceUpsert {
                match_id,
                key: ParticipantKey::External(name.clone()),
                display_name: name.clone(),
                username: None,
                status: AttendanceStatus::In,
            })
            .await?;
        log_attendance_change(match_id, &name, AttendanceStatus::In.as_str());
        Ok(name)
    }

    /// Remove an externally-named player. The only hard delete in the system.
    pub async fn remove_external(&self, match_id: i64, raw_name: &str) -> Result<String> {
        let name = normalize_external_name(raw_name)?;
        let removed = self
            .store
            .delete_attendance(match_id, &ParticipantKey::External(name.clone()))
            .await?;
        if !removed {
            return Err(MatchdayError::AttendeeNotFound { name });
        }
        tracing::info!(match_id = match_id, participant = %name, "External player removed");
        Ok(name)
    }

    /// Deterministic status summary: the three attendance groups in join order.
    pub async fn summary(&self, m: &Match) -> Result<MatchSummary> {
        let attendees = self.store.list_attendance(m.id).await?;
        Ok(MatchSummary::from_attendees(m, &attendees))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use assert_matches::assert_matches;
    use chrono::{Datelike, Duration, Local};

    fn service() -> MatchService {
        MatchService::new(Arc::new(MemoryStore::new()))
    }

    fn user(id: i64, name: &str) -> UserProfile {
        UserProfile {
            id,
            display_name: name.to_string(),
            username: None,
        }
    }

    /// A date/time pair guaranteed to be in the future of the real clock.
    fn future_tokens() -> (String, String) {
        let tomorrow = Local::now() + Duration::days(1);
        (
            format!("{}/{}", tomorrow.day(), tomorrow.month()),
            "23:59".to_string(),
        )
    }

    #[tokio::test]
    async fn create_match_round_trips_the_schedule() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, Some(-100), &date, &time).await.unwrap();

        let fetched = svc.get_match(m.id).await.unwrap();
        assert_eq!(fetched.scheduled_at, m.scheduled_at);
        assert_eq!(fetched.created_by, 1);
    }

    #[tokio::test]
    async fn create_match_rejects_bad_input_without_creating() {
        let svc = service();
        assert_matches!(
            svc.create_match(1, None, "garbage", "18:30").await,
            Err(MatchdayError::InvalidDate(_))
        );
        assert_matches!(
            svc.create_match(1, None, "14/6", "garbage").await,
            Err(MatchdayError::InvalidTime(_))
        );
        assert!(svc.list_upcoming(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_attendance_is_an_idempotent_total_overwrite() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();
        let creator = user(1, "Seba");

        svc.set_attendance(m.id, &creator, AttendanceStatus::In).await.unwrap();
        svc.set_attendance(m.id, &creator, AttendanceStatus::In).await.unwrap();
        let summary = svc.summary(&m).await.unwrap();
        assert_eq!(summary.attending, vec!["Seba"]);

        svc.set_attendance(m.id, &creator, AttendanceStatus::Out).await.unwrap();
        svc.set_attendance(m.id, &creator, AttendanceStatus::Maybe).await.unwrap();
        let summary = svc.summary(&m).await.unwrap();
        assert!(summary.attending.is_empty());
        assert!(summary.out.is_empty());
        assert_eq!(summary.maybe, vec!["Seba"]);
    }

    #[tokio::test]
    async fn external_names_share_one_record_across_spellings() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();

        svc.add_external(m.id, "maria lopez").await.unwrap();
        svc.add_external(m.id, "MARIA LOPEZ").await.unwrap();
        svc.add_external(m.id, " Maria  Lopez ").await.unwrap();

        let summary = svc.summary(&m).await.unwrap();
        assert_eq!(summary.attending, vec!["Maria Lopez"]);
    }

    #[tokio::test]
    async fn removing_an_unknown_external_leaves_the_ledger_unchanged() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();
        svc.add_external(m.id, "john").await.unwrap();

        assert_matches!(
            svc.remove_external(m.id, "maria").await,
            Err(MatchdayError::AttendeeNotFound { .. })
        );
        let summary = svc.summary(&m).await.unwrap();
        assert_eq!(summary.attending, vec!["John"]);
    }

    #[tokio::test]
    async fn remove_external_deletes_the_record() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();

        svc.add_external(m.id, "maria lopez").await.unwrap();
        svc.remove_external(m.id, "maria lopez").await.unwrap();

        let summary = svc.summary(&m).await.unwrap();
        assert!(summary.attending.is_empty());
    }

    #[tokio::test]
    async fn blank_external_names_are_rejected() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();

        assert_matches!(
            svc.add_external(m.id, "   ").await,
            Err(MatchdayError::EmptyName)
        );
    }

    #[tokio::test]
    async fn summary_groups_follow_join_order() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();

        svc.set_attendance(m.id, &user(1, "Seba"), AttendanceStatus::In).await.unwrap();
        svc.add_external(m.id, "maria").await.unwrap();
        svc.set_attendance(m.id, &user(2, "Ana"), AttendanceStatus::In).await.unwrap();

        let summary = svc.summary(&m).await.unwrap();
        assert_eq!(summary.attending, vec!["Seba", "Maria", "Ana"]);
    }

    #[tokio::test]
    async fn visibility_is_not_found_for_outsiders() {
        let svc = service();
        let (date, time) = future_tokens();
        let m = svc.create_match(1, None, &date, &time).await.unwrap();

        assert_matches!(
            svc.find_visible(m.id, 99).await,
            Err(MatchdayError::MatchNotFound { .. })
        );

        svc.set_attendance(m.id, &user(99, "Late"), AttendanceStatus::Maybe).await.unwrap();
        assert!(svc.find_visible(m.id, 99).await.is_ok());
    }
}
