//! HTTP server
//!
//! Exposes the health route and the platform webhook callback.

pub mod webhook;

use std::net::SocketAddr;
use std::sync::Arc;
use axum::{routing::{get, post}, Router};
use tracing::info;
use crate::config::Settings;
use crate::middleware::LoggingMiddleware;
use crate::services::ServiceFactory;
use crate::utils::errors::{GroupGuardError, Result};

pub const HEALTH_TEXT: &str = "LINE Bot 正常運作中";

#[derive(Clone)]
pub struct AppState {
    pub channel_secret: Arc<str>,
    pub services: ServiceFactory,
    pub logging: LoggingMiddleware,
}

impl AppState {
    pub fn new(settings: &Settings, services: ServiceFactory) -> Self {
        Self {
            channel_secret: Arc::from(settings.bot.channel_secret.as_str()),
            services,
            logging: LoggingMiddleware::default(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/callback", post(webhook::callback))
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_TEXT
}

/// Bind and serve until ctrl-c
pub async fn serve(settings: &Settings, state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .map_err(|e| GroupGuardError::Config(format!("Invalid listen address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Webhook server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
