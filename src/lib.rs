//! Matchday Telegram Bot
//!
//! Coordinates attendance for scheduled matches announced through Telegram.
//! A match card stays current on every surface it was shared to: the
//! originating chat message and any number of inline message instances.

pub mod config;
pub mod database;
pub mod dispatch;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MatchdayError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, MatchStore, MemoryStore};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
