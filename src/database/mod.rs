//! Settings persistence
//!
//! One `SettingsStore` interface with three interchangeable backends:
//! in-process memory, embedded SQLite and Redis. Everything above this module
//! is backend-agnostic.

pub mod connection;
pub mod memory;
pub mod redis;
pub mod sqlite;

use std::sync::Arc;
use async_trait::async_trait;
use crate::config::{Settings, StorageBackend};
use crate::models::{GroupSettings, ProtectionFlag};
use crate::utils::errors::Result;

pub use connection::{DatabaseConfig, DatabasePool, create_pool, run_migrations, health_check};
pub use memory::MemoryStore;
pub use self::redis::RedisStore;
pub use sqlite::SqliteStore;

/// Per-group protection settings storage
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored settings, or `GroupGuardError::SettingsNotFound`
    async fn get(&self, group_id: &str) -> Result<GroupSettings>;

    /// Create the record with every flag off unless it already exists.
    /// Returns whatever is stored afterwards; never overwrites.
    async fn init(&self, group_id: &str) -> Result<GroupSettings>;

    /// Update one flag; `GroupGuardError::SettingsNotFound` if the group is unknown
    async fn set(&self, group_id: &str, flag: ProtectionFlag, value: bool) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// Build the backend selected in the configuration
pub async fn connect(settings: &Settings) -> Result<Arc<dyn SettingsStore>> {
    let store: Arc<dyn SettingsStore> = match settings.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Sqlite => {
            let config = DatabaseConfig::from_settings(&settings.storage);
            let pool = create_pool(&config).await?;
            run_migrations(&pool).await?;
            Arc::new(SqliteStore::new(pool))
        }
        StorageBackend::Redis => Arc::new(RedisStore::connect(&settings.redis).await?),
    };

    tracing::info!(backend = store.backend_name(), "Settings store ready");
    Ok(store)
}
