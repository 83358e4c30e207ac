//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::handlers::rules::SeverityPolicy;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub redis: RedisConfig,
    pub moderation: ModerationConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// LINE channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub channel_access_token: String,
    pub channel_secret: String,
    /// Static administrator allow-list (LINE user ids)
    pub admin_ids: Vec<String>,
    pub api_base_url: String,
    /// Upper bound for every outbound LINE API call
    pub timeout_seconds: u64,
}

/// Webhook server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which settings backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
    Redis,
}

/// Settings persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub sqlite_url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
}

/// Moderation behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationConfig {
    pub severity: SeverityPolicy,
    /// Names shown in administrator notices instead of raw group ids
    pub group_names: Vec<GroupName>,
    /// Welcome template, `{name}` is replaced with the member's display name
    pub welcome_message: String,
    /// Used whenever a display name cannot be fetched
    pub placeholder_name: String,
}

/// Display name for one group
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupName {
    pub group_id: String,
    pub name: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub welcome_new_members: bool,
    pub self_kick: bool,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("GROUPGUARD")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GroupGuardError> {
        super::validation::validate_settings(self)
    }
}

/// Configured name of a group, or the raw id when none is configured
pub fn group_display_name<'a>(names: &'a [GroupName], group_id: &'a str) -> &'a str {
    names
        .iter()
        .find(|entry| entry.group_id == group_id)
        .map(|entry| entry.name.as_str())
        .unwrap_or(group_id)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                channel_access_token: String::new(),
                channel_secret: String::new(),
                admin_ids: vec![],
                api_base_url: "https://api.line.me".to_string(),
                timeout_seconds: 10,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                sqlite_url: "sqlite://group_settings.db".to_string(),
                max_connections: 5,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "groupguard:".to_string(),
            },
            moderation: ModerationConfig {
                severity: SeverityPolicy::default(),
                group_names: vec![],
                welcome_message: "{name} 歡迎加入群組🥳\n請先看看記事本的群規喔🎉".to_string(),
                placeholder_name: "使用者".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
            features: FeaturesConfig {
                welcome_new_members: true,
                self_kick: false,
            },
        }
    }
}
