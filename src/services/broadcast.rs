//! Surface tracking and broadcast fan-out
//!
//! Keeps every rendered copy of a match card consistent after a state change.
//! A broadcast recomputes one payload from current persisted state, updates
//! the origin surface when given one, then every other registered surface.
//! There is no versioning and no retry: surfaces converge on the next
//! broadcast, and a failure on one surface never blocks the rest.

use std::sync::Arc;

use tracing::warn;

use crate::database::store::MatchStore;
use crate::models::{MatchSummary, SurfaceHandle};
use crate::services::transport::SurfaceTransport;
use crate::utils::errors::{MatchdayError, Result};
use crate::utils::logging::log_broadcast;
use crate::utils::render::{match_keyboard, render_card};

#[derive(Clone)]
pub struct BroadcastService {
    store: Arc<dyn MatchStore>,
    transport: Arc<dyn SurfaceTransport>,
}

impl BroadcastService {
    pub fn new(store: Arc<dyn MatchStore>, transport: Arc<dyn SurfaceTransport>) -> Self {
        Self { store, transport }
    }

    /// Track a new rendered surface for the match. Registrations live as long
    /// as the match; re-registering a known handle is a no-op.
    pub async fn register_surface(&self, match_id: i64, handle: &SurfaceHandle) -> Result<()> {
        self.store.create_surface(match_id, handle).await?;
        tracing::debug!(match_id = match_id, handle = ?handle, "Surface registered");
        Ok(())
    }

    /// Push the current state of the match to every registered surface.
    ///
    /// `origin` is the surface that triggered the change (when the trigger was
    /// a button press on a concrete card); it is updated first and skipped in
    /// the fan-out so no surface is written twice in one broadcast. Transport
    /// failures are logged and swallowed: the triggering request was already
    /// acknowledged, and the remaining surfaces must still be updated.
    pub async fn broadcast(&self, match_id: i64, origin: Option<&SurfaceHandle>) -> Result<()> {
        let m = self
            .store
            .get_match(match_id)
            .await?
            .ok_or(MatchdayError::MatchNotFound { match_id })?;
        let attendees = self.store.list_attendance(match_id).await?;
        let summary = MatchSummary::from_attendees(&m, &attendees);
        let text = render_card(&summary);

        let mut updated = 0usize;
        let mut failures = 0usize;

        if let Some(origin) = origin {
            self.push(origin, &text, match_id, &mut updated, &mut failures).await;
        }

        for surface in self.store.list_surfaces(match_id).await? {
            let Some(handle) = surface.handle() else {
                continue;
            };
            if Some(&handle) == origin {
                continue;
            }
            self.push(&handle, &text, match_id, &mut updated, &mut failures).await;
        }

        log_broadcast(match_id, updated, failures);
        Ok(())
    }

    async fn push(
        &self,
        handle: &SurfaceHandle,
        text: &str,
        match_id: i64,
        updated: &mut usize,
        failures: &mut usize,
    ) {
        match self
            .transport
            .update_surface(handle, text, match_keyboard(match_id))
            .await
        {
            Ok(()) => *updated += 1,
            Err(e) => {
                *failures += 1;
                warn!(match_id = match_id, handle = ?handle, error = %e, "Failed to update surface");
            }
        }
    }
}
