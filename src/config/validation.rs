//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GroupGuardError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_server_config(&settings.server)?;
    validate_storage_config(settings)?;
    validate_moderation_config(&settings.moderation)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate LINE channel configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.channel_access_token.is_empty() {
        return Err(GroupGuardError::Config(
            "Channel access token is required".to_string()
        ));
    }

    if config.channel_secret.is_empty() {
        return Err(GroupGuardError::Config(
            "Channel secret is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() {
        return Err(GroupGuardError::Config(
            "At least one admin ID must be configured".to_string()
        ));
    }

    url::Url::parse(&config.api_base_url).map_err(|e| {
        GroupGuardError::Config(format!("Invalid LINE API base URL {}: {}", config.api_base_url, e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(GroupGuardError::Config(
            "LINE API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate webhook server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(GroupGuardError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(GroupGuardError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate the configuration of the selected storage backend
fn validate_storage_config(settings: &Settings) -> Result<()> {
    match settings.storage.backend {
        StorageBackend::Memory => {}
        StorageBackend::Sqlite => {
            if settings.storage.sqlite_url.is_empty() {
                return Err(GroupGuardError::Config(
                    "SQLite URL is required for the sqlite backend".to_string()
                ));
            }

            if settings.storage.max_connections == 0 {
                return Err(GroupGuardError::Config(
                    "Max connections must be greater than 0".to_string()
                ));
            }
        }
        StorageBackend::Redis => {
            if settings.redis.url.is_empty() {
                return Err(GroupGuardError::Config(
                    "Redis URL is required for the redis backend".to_string()
                ));
            }
        }
    }

    Ok(())
}

/// Validate moderation configuration
fn validate_moderation_config(config: &super::ModerationConfig) -> Result<()> {
    if !config.welcome_message.contains("{name}") {
        return Err(GroupGuardError::Config(
            "Welcome message must contain the {name} placeholder".to_string()
        ));
    }

    if config.placeholder_name.is_empty() {
        return Err(GroupGuardError::Config(
            "Placeholder name cannot be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GroupGuardError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GroupGuardError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
