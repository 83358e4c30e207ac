//! In-process settings store

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::models::{GroupSettings, ProtectionFlag};
use crate::utils::errors::{GroupGuardError, Result};
use super::SettingsStore;

/// Settings kept in a map; lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: RwLock<HashMap<String, GroupSettings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, group_id: &str) -> Result<GroupSettings> {
        self.groups
            .read()
            .await
            .get(group_id)
            .cloned()
            .ok_or_else(|| GroupGuardError::SettingsNotFound { group_id: group_id.to_string() })
    }

    async fn init(&self, group_id: &str) -> Result<GroupSettings> {
        let mut groups = self.groups.write().await;
        let settings = groups
            .entry(group_id.to_string())
            .or_insert_with(|| GroupSettings::new(group_id));
        Ok(settings.clone())
    }

    async fn set(&self, group_id: &str, flag: ProtectionFlag, value: bool) -> Result<()> {
        let mut groups = self.groups.write().await;
        let settings = groups
            .get_mut(group_id)
            .ok_or_else(|| GroupGuardError::SettingsNotFound { group_id: group_id.to_string() })?;
        settings.set(flag, value);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
