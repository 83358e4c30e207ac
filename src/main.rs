//! GroupGuard LINE Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use tracing::info;

use GroupGuard::{
    config::Settings,
    database,
    server::{self, AppState},
    services::{LineApiClient, ServiceFactory},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading the environment
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", GroupGuard::info());

    // Initialize settings storage
    info!(backend = ?settings.storage.backend, "Connecting to settings store...");
    let store = database::connect(&settings).await?;

    // Initialize platform client and services
    let client = Arc::new(LineApiClient::new(&settings.bot)?);
    let services = ServiceFactory::new(&settings, store, client);
    info!(admins = services.auth_service.admin_ids().len(), "Services initialized");

    server::serve(&settings, AppState::new(&settings, services)).await?;

    info!("GroupGuard bot has been shut down.");
    Ok(())
}
