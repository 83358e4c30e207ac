//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GroupGuard bot.

use tracing::{info, warn, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{GroupGuardError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| GroupGuardError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let guard = match &config.file_path {
        Some(path) => {
            let file_appender = tracing_appender::rolling::daily(path, "groupguard.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
                .try_init()
                .map_err(|e| GroupGuardError::Config(e.to_string()))?;
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()
                .map_err(|e| GroupGuardError::Config(e.to_string()))?;
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log group events
pub fn log_group_event(group_id: &str, event: &str, user_id: Option<&str>, details: Option<&str>) {
    info!(
        group_id = group_id,
        event = event,
        user_id = user_id,
        details = details,
        "Group event occurred"
    );
}

/// Log a rule violation
pub fn log_violation(group_id: &str, user_id: &str, rule: &str, removed: bool) {
    warn!(
        group_id = group_id,
        user_id = user_id,
        rule = rule,
        removed = removed,
        "Protection rule violated"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
