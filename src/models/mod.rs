//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod action;
pub mod event;
pub mod settings;
pub mod webhook;

// Re-export commonly used models
pub use action::Action;
pub use event::{Actor, EventContext, EventSource, InboundEvent, JoinedMember, MentionSpan};
pub use settings::{GroupSettings, ProtectionFlag};
pub use webhook::{ParsedEvent, WebhookEvent, WebhookPayload};
