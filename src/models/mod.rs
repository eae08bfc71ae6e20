//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod attendance;
pub mod callback;
pub mod matches;
pub mod surface;

// Re-export commonly used models
pub use attendance::{
    normalize_external_name, AttendanceStatus, AttendanceUpsert, Attendee, ParticipantKey,
};
pub use callback::{CallbackCommand, CallbackData};
pub use matches::{Match, MatchSummary, NewMatch};
pub use surface::{MatchSurface, SurfaceHandle};
