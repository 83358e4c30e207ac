//! LINE webhook payload
//!
//! Only the parts of the payload the bot reacts to are modelled; every other
//! event or message type deserializes into an `Unsupported` variant and is
//! skipped by the server.

use serde::{Deserialize, Serialize};
use super::event::{EventSource, InboundEvent, MentionSpan};

/// Body of a webhook delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    #[serde(rename_all = "camelCase")]
    Message {
        reply_token: Option<String>,
        source: WebhookSource,
        message: MessageContent,
    },
    #[serde(rename_all = "camelCase")]
    MemberJoined {
        reply_token: Option<String>,
        source: WebhookSource,
        joined: JoinedMembers,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookSource {
    #[serde(rename_all = "camelCase")]
    User { user_id: String },
    #[serde(rename_all = "camelCase")]
    Group { group_id: String, user_id: Option<String> },
    #[serde(rename_all = "camelCase")]
    Room { room_id: String, user_id: Option<String> },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text {
        text: String,
        #[serde(default)]
        mention: Option<Mention>,
    },
    #[serde(rename_all = "camelCase")]
    Sticker {
        package_id: Option<String>,
        sticker_id: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Mention {
    #[serde(default)]
    pub mentionees: Vec<Mentionee>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentionee {
    pub index: usize,
    pub length: usize,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JoinedMembers {
    #[serde(default)]
    pub members: Vec<JoinedSource>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl From<WebhookSource> for EventSource {
    fn from(source: WebhookSource) -> Self {
        match source {
            WebhookSource::User { user_id } => EventSource::User { user_id },
            WebhookSource::Group { group_id, user_id } => EventSource::Group { group_id, user_id },
            WebhookSource::Room { room_id, user_id } => EventSource::Room { room_id, user_id },
        }
    }
}

/// Webhook event reduced to what the dispatcher consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub source: EventSource,
    pub reply_token: Option<String>,
    pub event: InboundEvent,
    /// Users that joined, names still unresolved (member-joined events only)
    pub joined_user_ids: Vec<String>,
}

impl WebhookEvent {
    /// Convert into the core event model; `None` for types the bot ignores
    pub fn into_parsed(self) -> Option<ParsedEvent> {
        match self {
            WebhookEvent::Message { reply_token, source, message } => {
                let event = match message {
                    MessageContent::Text { text, mention } => InboundEvent::Text {
                        text,
                        mentions: mention
                            .map(|m| {
                                m.mentionees
                                    .into_iter()
                                    .map(|m| MentionSpan { index: m.index, length: m.length, user_id: m.user_id })
                                    .collect()
                            })
                            .unwrap_or_default(),
                    },
                    MessageContent::Sticker { .. } => InboundEvent::Sticker,
                    MessageContent::Unsupported => return None,
                };
                Some(ParsedEvent {
                    source: source.into(),
                    reply_token,
                    event,
                    joined_user_ids: Vec::new(),
                })
            }
            WebhookEvent::MemberJoined { reply_token, source, joined } => {
                // Only members of type "user" get a welcome
                let joined_user_ids = joined
                    .members
                    .into_iter()
                    .filter(|member| member.kind == "user")
                    .filter_map(|member| member.user_id)
                    .collect();
                Some(ParsedEvent {
                    source: source.into(),
                    reply_token,
                    event: InboundEvent::MemberJoined { members: Vec::new() },
                    joined_user_ids,
                })
            }
            WebhookEvent::Unsupported => None,
        }
    }
}
