//! Error handling for GroupGuard
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for GroupGuard application
#[derive(Error, Debug)]
pub enum GroupGuardError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LINE API error: {0}")]
    Line(#[from] LineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings not found for group: {group_id}")]
    SettingsNotFound { group_id: String },

    #[error("Invalid webhook signature")]
    InvalidSignature,
}

/// LINE Messaging API specific errors
#[derive(Error, Debug)]
pub enum LineError {
    #[error("LINE API request failed: {0}")]
    RequestFailed(String),

    #[error("LINE API timeout")]
    Timeout,

    #[error("Invalid LINE API response: {0}")]
    InvalidResponse(String),

    #[error("LINE API unavailable")]
    ServiceUnavailable,
}

/// Result type alias for GroupGuard operations
pub type Result<T> = std::result::Result<T, GroupGuardError>;

/// Result type alias for LINE API operations
pub type LineResult<T> = std::result::Result<T, LineError>;

impl From<config::ConfigError> for GroupGuardError {
    fn from(err: config::ConfigError) -> Self {
        GroupGuardError::Config(err.to_string())
    }
}

impl GroupGuardError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GroupGuardError::Database(_) => false,
            GroupGuardError::Migration(_) => false,
            GroupGuardError::Redis(_) => true,
            GroupGuardError::Http(_) => true,
            GroupGuardError::Line(_) => true,
            GroupGuardError::Serialization(_) => false,
            GroupGuardError::Io(_) => true,
            GroupGuardError::Config(_) => false,
            GroupGuardError::SettingsNotFound { .. } => true,
            GroupGuardError::InvalidSignature => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GroupGuardError::Database(_) => ErrorSeverity::Critical,
            GroupGuardError::Migration(_) => ErrorSeverity::Critical,
            GroupGuardError::Config(_) => ErrorSeverity::Critical,
            GroupGuardError::SettingsNotFound { .. } => ErrorSeverity::Info,
            GroupGuardError::InvalidSignature => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
