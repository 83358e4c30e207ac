//! Inbound event model
//!
//! Platform-neutral view of what arrived from the webhook, produced by the
//! server layer and consumed by the dispatcher.

use serde::{Deserialize, Serialize};

/// Where an event came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    /// One-to-one chat with the bot
    User { user_id: String },
    /// Group chat; `user_id` is missing when the platform withholds it
    Group { group_id: String, user_id: Option<String> },
    /// Multi-person chat without a group record
    Room { room_id: String, user_id: Option<String> },
}

impl EventSource {
    /// Group id if this is a group-scoped event
    pub fn group_id(&self) -> Option<&str> {
        match self {
            EventSource::Group { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            EventSource::User { user_id } => Some(user_id),
            EventSource::Group { user_id, .. } | EventSource::Room { user_id, .. } => user_id.as_deref(),
        }
    }
}

/// Structural annotation marking that a user was tagged in a text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSpan {
    pub index: usize,
    pub length: usize,
    pub user_id: Option<String>,
}

/// Member reported in a member-joined event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedMember {
    pub user_id: String,
    /// Resolved before dispatch; `None` when the profile lookup failed
    pub display_name: Option<String>,
}

/// Inbound events the moderation core understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    Text { text: String, mentions: Vec<MentionSpan> },
    Sticker,
    MemberJoined { members: Vec<JoinedMember> },
}

impl InboundEvent {
    pub fn text(text: impl Into<String>) -> Self {
        InboundEvent::Text { text: text.into(), mentions: Vec::new() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Text { .. } => "text",
            InboundEvent::Sticker => "sticker",
            InboundEvent::MemberJoined { .. } => "member_joined",
        }
    }
}

/// Envelope data the dispatcher needs besides the event itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub source: EventSource,
    /// Display name of the sender, resolved before dispatch
    pub sender_name: Option<String>,
}

impl EventContext {
    pub fn group(group_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            source: EventSource::Group {
                group_id: group_id.into(),
                user_id: Some(user_id.into()),
            },
            sender_name: None,
        }
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }
}

/// The user behind an event, derived per event and never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub group_id: String,
    pub display_name: String,
    pub is_admin: bool,
}
