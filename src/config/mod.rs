//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{BotConfig, DatabaseConfig, DispatchConfig, LoggingConfig, Settings};
