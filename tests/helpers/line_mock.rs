//! Mock LINE Messaging API server for testing
//!
//! This module provides a mock HTTP server that simulates the LINE Messaging
//! API endpoints the bot calls. It uses wiremock to create configurable
//! responses and to inspect what the bot sent.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, path_regex},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const REPLY_PATH: &str = "/v2/bot/message/reply";
pub const PUSH_PATH: &str = "/v2/bot/message/push";

/// Mock LINE API server for testing
pub struct LineMockServer {
    pub server: MockServer,
}

impl LineMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Reply and push succeed
    pub async fn setup_default_mocks(&self) {
        self.mock_ok(REPLY_PATH).await;
        self.mock_ok(PUSH_PATH).await;
    }

    async fn mock_ok(&self, endpoint: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&self.server)
            .await;
    }

    /// Profile lookup for one member
    pub async fn mock_profile(&self, group_id: &str, user_id: &str, display_name: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v2/bot/group/{}/member/{}", group_id, user_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "displayName": display_name,
                "userId": user_id,
                "pictureUrl": "https://profile.line-scdn.net/abc"
            })))
            .mount(&self.server)
            .await;
    }

    /// Member removal answering with the given status for any member
    pub async fn mock_kickout(&self, status: u16) {
        let template = if status == 200 {
            ResponseTemplate::new(200).set_body_json(json!({}))
        } else {
            ResponseTemplate::new(status).set_body_json(json!({ "message": "Not allowed to kick out" }))
        };

        Mock::given(method("POST"))
            .and(path_regex(r"^/v2/bot/group/[^/]+/member/[^/]+/kickout$"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Text of every message sent through reply calls, per call
    pub async fn replies(&self) -> Vec<Vec<String>> {
        self.requests()
            .await
            .iter()
            .filter(|req| req.url.path() == REPLY_PATH)
            .map(|req| message_texts(&body_json(req)))
            .collect()
    }

    /// (recipient, text) of every push call
    pub async fn pushes(&self) -> Vec<(String, String)> {
        self.requests()
            .await
            .iter()
            .filter(|req| req.url.path() == PUSH_PATH)
            .map(|req| {
                let body = body_json(req);
                let to = body["to"].as_str().unwrap_or_default().to_string();
                let text = message_texts(&body).into_iter().next().unwrap_or_default();
                (to, text)
            })
            .collect()
    }

    /// Paths of every kickout call
    pub async fn kickouts(&self) -> Vec<String> {
        self.requests()
            .await
            .iter()
            .map(|req| req.url.path().to_string())
            .filter(|p| p.ends_with("/kickout"))
            .collect()
    }

    /// Calls other than profile lookups
    pub async fn outbound_messages(&self) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|req| req.method.as_str() == "POST")
            .count()
    }
}

fn body_json(req: &Request) -> Value {
    serde_json::from_slice(&req.body).unwrap_or(Value::Null)
}

fn message_texts(body: &Value) -> Vec<String> {
    body["messages"]
        .as_array()
        .map(|messages| {
            messages
                .iter()
                .filter_map(|m| m["text"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
