//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod attendance;
pub mod matches;
pub mod surfaces;

// Re-export repositories
pub use attendance::AttendanceRepository;
pub use matches::MatchRepository;
pub use surfaces::SurfaceRepository;
