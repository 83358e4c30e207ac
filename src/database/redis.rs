//! Redis settings store
//!
//! Each group is one hash under `{prefix}group_settings:{group_id}` with a
//! `"0"`/`"1"` field per flag. Toggles write a single field, so concurrent
//! updates of different flags never overwrite each other.

use std::collections::HashMap;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;
use crate::config::RedisConfig;
use crate::models::{GroupSettings, ProtectionFlag};
use crate::utils::errors::{GroupGuardError, Result};
use super::SettingsStore;

#[derive(Clone)]
pub struct RedisStore {
    connection_manager: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            prefix: config.prefix.clone(),
        })
    }

    fn key(&self, group_id: &str) -> String {
        settings_key(&self.prefix, group_id)
    }
}

pub(crate) fn settings_key(prefix: &str, group_id: &str) -> String {
    format!("{}group_settings:{}", prefix, group_id)
}

/// Rebuild settings from a hash; `None` for an empty (missing) hash
pub(crate) fn settings_from_hash(group_id: &str, fields: &HashMap<String, String>) -> Option<GroupSettings> {
    if fields.is_empty() {
        return None;
    }

    let mut settings = GroupSettings::new(group_id);
    for flag in ProtectionFlag::ALL {
        let enabled = fields.get(flag.key()).map(|v| v == "1").unwrap_or(false);
        settings.set(flag, enabled);
    }
    Some(settings)
}

fn flag_value(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

#[async_trait]
impl SettingsStore for RedisStore {
    async fn get(&self, group_id: &str) -> Result<GroupSettings> {
        let mut conn = self.connection_manager.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.key(group_id)).await?;

        settings_from_hash(group_id, &fields)
            .ok_or_else(|| GroupGuardError::SettingsNotFound { group_id: group_id.to_string() })
    }

    async fn init(&self, group_id: &str) -> Result<GroupSettings> {
        let key = self.key(group_id);
        let mut conn = self.connection_manager.clone();

        let mut pipe = redis::pipe();
        pipe.atomic().hset_nx(&key, "group_id", group_id).ignore();
        for flag in ProtectionFlag::ALL {
            pipe.hset_nx(&key, flag.key(), flag_value(false)).ignore();
        }
        pipe.query_async::<_, ()>(&mut conn).await?;

        debug!(key = %key, "Ensured group settings hash");
        self.get(group_id).await
    }

    async fn set(&self, group_id: &str, flag: ProtectionFlag, value: bool) -> Result<()> {
        let key = self.key(group_id);
        let mut conn = self.connection_manager.clone();

        let exists: bool = conn.exists(&key).await?;
        if !exists {
            return Err(GroupGuardError::SettingsNotFound { group_id: group_id.to_string() });
        }

        conn.hset::<_, _, _, ()>(&key, flag.key(), flag_value(value)).await?;
        debug!(key = %key, flag = %flag, value = value, "Updated group setting");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
