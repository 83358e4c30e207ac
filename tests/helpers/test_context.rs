//! Test context for unified test setup
//!
//! This module provides a unified test context that initializes the mock
//! LINE API, a settings store and the real webhook router.

use std::sync::Arc;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use GroupGuard::config::{Settings, StorageBackend};
use GroupGuard::database::{self, SettingsStore};
use GroupGuard::middleware::signature::sign;
use GroupGuard::server::{router, AppState};
use GroupGuard::services::{LineApiClient, ServiceFactory};

use super::line_mock::LineMockServer;
use super::test_data::ADMIN_ID;

pub const CHANNEL_SECRET: &str = "test-channel-secret";

/// Test configuration options
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub backend: StorageBackend,
    pub self_kick: bool,
    pub setup_default_mocks: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            self_kick: false,
            setup_default_mocks: true,
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub line_mock: LineMockServer,
    pub settings: Settings,
    pub store: Arc<dyn SettingsStore>,
    pub app: axum::Router,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::new_with_config(TestConfig::default()).await
    }

    pub async fn new_with_config(config: TestConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir()?;

        let line_mock = LineMockServer::new().await;
        if config.setup_default_mocks {
            line_mock.setup_default_mocks().await;
        }

        let mut settings = Settings::default();
        settings.bot.channel_access_token = "test-access-token".to_string();
        settings.bot.channel_secret = CHANNEL_SECRET.to_string();
        settings.bot.admin_ids = vec![ADMIN_ID.to_string()];
        settings.bot.api_base_url = line_mock.uri();
        settings.bot.timeout_seconds = 5;
        settings.storage.backend = config.backend;
        settings.storage.sqlite_url = format!("sqlite://{}", temp_dir.path().join("settings.db").display());
        settings.features.self_kick = config.self_kick;
        settings.validate()?;

        let store = database::connect(&settings).await?;
        let client = Arc::new(LineApiClient::new(&settings.bot)?);
        let services = ServiceFactory::new(&settings, store.clone(), client);
        let app = router(AppState::new(&settings, services));

        Ok(Self {
            line_mock,
            settings,
            store,
            app,
            temp_dir,
        })
    }

    /// Deliver a signed webhook payload
    pub async fn deliver(&self, payload: &Value) -> StatusCode {
        let body = payload.to_string();
        let signature = sign(CHANNEL_SECRET, body.as_bytes()).expect("sign payload");
        self.post_raw(body, Some(signature)).await
    }

    pub async fn post_raw(&self, body: String, signature: Option<String>) -> StatusCode {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/callback")
            .header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header("X-Line-Signature", signature);
        }

        let response = self
            .app
            .clone()
            .oneshot(builder.body(Body::from(body)).expect("build request"))
            .await
            .expect("router is infallible");
        response.status()
    }
}
