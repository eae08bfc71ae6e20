//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{create_pool, run_migrations, DatabasePool, PoolConfig};
pub use memory::MemoryStore;
pub use repositories::{AttendanceRepository, MatchRepository, SurfaceRepository};
pub use service::DatabaseService;
pub use store::MatchStore;
