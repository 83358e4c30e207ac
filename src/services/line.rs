//! LINE Messaging API client
//!
//! This service wraps the handful of Messaging API endpoints the bot needs
//! (reply, push, member profile, member removal) behind the
//! `MessagingClient` trait, with timeout handling and error mapping.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use crate::config::BotConfig;
use crate::utils::errors::{GroupGuardError, LineError, LineResult, Result};

/// Maximum number of messages accepted by one reply call
pub const MAX_REPLY_MESSAGES: usize = 5;

/// Member profile returned by the group member endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub user_id: String,
    #[serde(default)]
    pub picture_url: Option<String>,
}

/// Outbound side of the messaging platform
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Reply through a single-use reply token
    async fn reply(&self, reply_token: &str, texts: &[String]) -> LineResult<()>;

    /// Push a text message to a user
    async fn push(&self, to: &str, text: &str) -> LineResult<()>;

    async fn group_member_profile(&self, group_id: &str, user_id: &str) -> LineResult<Profile>;

    async fn remove_member(&self, group_id: &str, user_id: &str) -> LineResult<()>;
}

/// HTTP implementation of [`MessagingClient`]
#[derive(Debug, Clone)]
pub struct LineApiClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl LineApiClient {
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("GroupGuard-Bot/1.0")
            .build()
            .map_err(GroupGuardError::Http)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.channel_access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> LineResult<reqwest::Response> {
        let url = self.url(path);
        debug!(url = %url, "POST LINE API");

        let response = self.client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        check_status(response).await
    }
}

fn map_request_error(e: reqwest::Error) -> LineError {
    if e.is_timeout() {
        LineError::Timeout
    } else if e.is_connect() {
        LineError::ServiceUnavailable
    } else {
        LineError::RequestFailed(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> LineResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    Err(LineError::RequestFailed(format!("HTTP {}: {}", status, error_text)))
}

fn text_messages(texts: &[String]) -> Vec<serde_json::Value> {
    texts.iter().map(|text| json!({ "type": "text", "text": text })).collect()
}

#[async_trait]
impl MessagingClient for LineApiClient {
    async fn reply(&self, reply_token: &str, texts: &[String]) -> LineResult<()> {
        if texts.is_empty() {
            return Ok(());
        }

        let texts = if texts.len() > MAX_REPLY_MESSAGES {
            warn!(count = texts.len(), "Reply exceeds message limit, extra messages dropped");
            &texts[..MAX_REPLY_MESSAGES]
        } else {
            texts
        };

        self.post_json(
            "/v2/bot/message/reply",
            json!({ "replyToken": reply_token, "messages": text_messages(texts) }),
        )
        .await?;
        Ok(())
    }

    async fn push(&self, to: &str, text: &str) -> LineResult<()> {
        self.post_json(
            "/v2/bot/message/push",
            json!({ "to": to, "messages": [{ "type": "text", "text": text }] }),
        )
        .await?;
        Ok(())
    }

    async fn group_member_profile(&self, group_id: &str, user_id: &str) -> LineResult<Profile> {
        let url = self.url(&format!("/v2/bot/group/{}/member/{}", group_id, user_id));
        debug!(url = %url, "GET LINE API");

        let response = self.client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(map_request_error)?;

        check_status(response)
            .await?
            .json::<Profile>()
            .await
            .map_err(|e| LineError::InvalidResponse(e.to_string()))
    }

    async fn remove_member(&self, group_id: &str, user_id: &str) -> LineResult<()> {
        self.post_json(
            &format!("/v2/bot/group/{}/member/{}/kickout", group_id, user_id),
            json!({}),
        )
        .await?;
        Ok(())
    }
}
