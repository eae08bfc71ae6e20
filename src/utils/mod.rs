//! Utility module
//!
//! Errors, logging setup, schedule parsing and card rendering.

pub mod errors;
pub mod logging;
pub mod render;
pub mod time;

pub use errors::{MatchdayError, Result};
