//! Configuration validation module

use super::Settings;
use crate::utils::errors::{MatchdayError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_dispatch_config(&settings.dispatch)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(MatchdayError::Config("Bot token is required".to_string()));
    }

    Ok(())
}

fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(MatchdayError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(MatchdayError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(MatchdayError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

fn validate_dispatch_config(config: &super::DispatchConfig) -> Result<()> {
    if config.queue_capacity == 0 {
        return Err(MatchdayError::Config(
            "Queue capacity must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MatchdayError::Config("Log level is required".to_string()));
    }

    Ok(())
}
