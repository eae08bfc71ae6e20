//! Logging configuration and setup

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log attendance changes with structured data
pub fn log_attendance_change(match_id: i64, participant: &str, status: &str) {
    info!(
        match_id = match_id,
        participant = participant,
        status = status,
        "Attendance updated"
    );
}

/// Log surface fan-out results
pub fn log_broadcast(match_id: i64, surfaces: usize, failures: usize) {
    info!(
        match_id = match_id,
        surfaces = surfaces,
        failures = failures,
        "Broadcast completed"
    );
}
