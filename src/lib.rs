//! GroupGuard LINE Bot
//!
//! A LINE group moderation bot. It watches group messages for protected
//! content (mass mentions, invite links, note and album keywords, sticker
//! floods), warns and optionally removes offenders, and lets administrators
//! toggle the protections per group with chat commands.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GroupGuardError, Result};

// Re-export main components for easy access
pub use database::SettingsStore;
pub use handlers::{Dispatcher, RuleEngine};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
