//! Embedded SQLite settings store

use async_trait::async_trait;
use crate::models::{GroupSettings, ProtectionFlag};
use crate::utils::errors::{GroupGuardError, Result};
use super::{DatabasePool, SettingsStore};

const SELECT_SETTINGS: &str = "SELECT group_id, kick_protect, invite_protect, name_image_protect, \
    invite_link_protect, note_protect, album_protect, mention_protect, sticker_protect \
    FROM group_settings WHERE group_id = ?";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DatabasePool,
}

impl SqliteStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    async fn find(&self, group_id: &str) -> Result<Option<GroupSettings>> {
        let settings = sqlx::query_as::<_, GroupSettings>(SELECT_SETTINGS)
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(settings)
    }
}

#[async_trait]
impl SettingsStore for SqliteStore {
    async fn get(&self, group_id: &str) -> Result<GroupSettings> {
        self.find(group_id)
            .await?
            .ok_or_else(|| GroupGuardError::SettingsNotFound { group_id: group_id.to_string() })
    }

    async fn init(&self, group_id: &str) -> Result<GroupSettings> {
        let inserted = sqlx::query("INSERT OR IGNORE INTO group_settings (group_id) VALUES (?)")
            .bind(group_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if inserted > 0 {
            tracing::debug!(group_id = group_id, "Created default group settings");
        }

        self.get(group_id).await
    }

    async fn set(&self, group_id: &str, flag: ProtectionFlag, value: bool) -> Result<()> {
        // Column name comes from a closed enum, never from user input
        let sql = format!("UPDATE group_settings SET {} = ? WHERE group_id = ?", flag.key());
        let updated = sqlx::query(&sql)
            .bind(value)
            .bind(group_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(GroupGuardError::SettingsNotFound { group_id: group_id.to_string() });
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
