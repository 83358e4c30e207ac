//! Services module
//!
//! This module contains the services wired around the moderation core

pub mod auth;
pub mod line;
pub mod moderation;
pub mod notification;

// Re-export commonly used services
pub use auth::AuthService;
pub use line::{LineApiClient, MessagingClient, Profile};
pub use moderation::ModerationService;
pub use notification::{ActionExecutor, ExecutionReport};

use std::sync::Arc;
use crate::config::Settings;
use crate::database::SettingsStore;
use crate::handlers::Dispatcher;

/// Service factory for creating and wiring all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub messaging_client: Arc<dyn MessagingClient>,
    pub moderation_service: ModerationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        store: Arc<dyn SettingsStore>,
        messaging_client: Arc<dyn MessagingClient>,
    ) -> Self {
        let auth_service = AuthService::new(settings.bot.admin_ids.clone());
        let dispatcher = Dispatcher::new(
            store.clone(),
            auth_service.clone(),
            &settings.moderation,
            &settings.features,
        );
        let executor = ActionExecutor::new(
            messaging_client.clone(),
            store,
            settings.bot.admin_ids.clone(),
            settings.moderation.group_names.clone(),
        );
        let moderation_service = ModerationService::new(dispatcher, executor);

        Self {
            auth_service,
            messaging_client,
            moderation_service,
        }
    }
}
