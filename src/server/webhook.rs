//! Webhook callback
//!
//! Verifies and parses a delivery, resolves display names through the
//! platform and hands each event to the moderation pipeline in order.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{debug, error};
use crate::middleware::{verify_signature, SIGNATURE_HEADER};
use crate::models::{EventContext, InboundEvent, JoinedMember, ParsedEvent, WebhookPayload};
use crate::services::MessagingClient;
use crate::utils::logging::log_api_error;
use super::AppState;

pub async fn callback(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> (StatusCode, &'static str) {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    state.logging.log_delivery(body.len(), signature.is_some());

    let Some(signature) = signature else {
        state.logging.log_rejected("missing signature");
        return (StatusCode::BAD_REQUEST, "Missing signature");
    };

    if verify_signature(&state.channel_secret, &body, signature).is_err() {
        state.logging.log_rejected("invalid signature");
        return (StatusCode::BAD_REQUEST, "Invalid signature");
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            state.logging.log_error(&e, "parse webhook payload", None);
            return (StatusCode::BAD_REQUEST, "Invalid payload");
        }
    };

    for parsed in payload.events.into_iter().filter_map(|event| event.into_parsed()) {
        handle_event(&state, parsed).await;
    }

    (StatusCode::OK, "OK")
}

async fn handle_event(state: &AppState, parsed: ParsedEvent) {
    let client = state.services.messaging_client.as_ref();
    let tracker = state.logging.create_performance_span("handle_event");

    let ParsedEvent { source, reply_token, event, joined_user_ids } = parsed;
    state.logging.log_event(&source, &event);

    let Some(group_id) = source.group_id().map(str::to_string) else {
        debug!(kind = event.kind(), "Ignoring event outside a group");
        return;
    };

    let (ctx, event) = match event {
        InboundEvent::MemberJoined { .. } => {
            let mut members = Vec::with_capacity(joined_user_ids.len());
            for user_id in joined_user_ids {
                let display_name = resolve_name(client, &group_id, &user_id).await;
                members.push(JoinedMember { user_id, display_name });
            }
            (EventContext { source, sender_name: None }, InboundEvent::MemberJoined { members })
        }
        event => {
            let sender_name = match source.user_id() {
                Some(user_id) => resolve_name(client, &group_id, user_id).await,
                None => None,
            };
            (EventContext { source, sender_name }, event)
        }
    };

    let result = state
        .services
        .moderation_service
        .process(&ctx, &event, reply_token.as_deref())
        .await;

    match result {
        Ok(report) => {
            debug!(group_id = %group_id, report = ?report, "Event handled");
            if let Some(tracker) = tracker {
                tracker.complete(report.failures == 0);
            }
        }
        Err(e) => {
            error!(group_id = %group_id, error = %e, "Failed to handle event");
            if let Some(tracker) = tracker {
                tracker.complete(false);
            }
        }
    }
}

/// Display name of a group member; `None` when the lookup fails
async fn resolve_name(client: &dyn MessagingClient, group_id: &str, user_id: &str) -> Option<String> {
    match client.group_member_profile(group_id, user_id).await {
        Ok(profile) => Some(profile.display_name),
        Err(e) => {
            log_api_error("group_member_profile", &e.to_string(), Some(user_id));
            None
        }
    }
}
