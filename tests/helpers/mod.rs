//! Test helpers
//!
//! A recording transport double standing in for the Telegram edit calls, and
//! small factories for schedules and user profiles.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Datelike, Duration, Local};
use teloxide::types::InlineKeyboardMarkup;

use matchday::models::SurfaceHandle;
use matchday::services::{ServiceFactory, SurfaceTransport, UserProfile};
use matchday::{MatchdayError, MemoryStore};

/// Transport double that records every surface update and can be told to fail
/// for selected handles.
#[derive(Default)]
pub struct RecordingTransport {
    pushes: Mutex<Vec<(SurfaceHandle, String)>>,
    failing: Mutex<HashSet<SurfaceHandle>>,
}

impl RecordingTransport {
    pub fn fail_on(&self, handle: SurfaceHandle) {
        self.failing.lock().unwrap().insert(handle);
    }

    /// Every (handle, card text) pair pushed so far, in push order.
    pub fn pushes(&self) -> Vec<(SurfaceHandle, String)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.pushes.lock().unwrap().clear();
    }
}

#[async_trait]
impl SurfaceTransport for RecordingTransport {
    async fn update_surface(
        &self,
        handle: &SurfaceHandle,
        text: &str,
        _keyboard: InlineKeyboardMarkup,
    ) -> matchday::Result<()> {
        if self.failing.lock().unwrap().contains(handle) {
            return Err(MatchdayError::Config("transport down".to_string()));
        }
        self.pushes
            .lock()
            .unwrap()
            .push((handle.clone(), text.to_string()));
        Ok(())
    }
}

/// Services wired to an in-memory store and a recording transport.
pub fn test_services() -> (ServiceFactory, Arc<RecordingTransport>) {
    let store = Arc::new(MemoryStore::new());
    let transport = Arc::new(RecordingTransport::default());
    (ServiceFactory::new(store, transport.clone()), transport)
}

/// Date and time tokens guaranteed to parse to a future instant.
pub fn tomorrow_tokens() -> (String, String) {
    let tomorrow = Local::now() + Duration::days(1);
    (
        format!("{}/{}", tomorrow.day(), tomorrow.month()),
        "23:59".to_string(),
    )
}

pub fn test_user(id: i64, name: &str) -> UserProfile {
    UserProfile {
        id,
        display_name: name.to_string(),
        username: None,
    }
}

pub fn chat_surface(message_id: i32) -> SurfaceHandle {
    SurfaceHandle::ChatMessage {
        chat_id: -1001234567890,
        message_id,
    }
}
