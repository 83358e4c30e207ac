//! Actions emitted by the moderation core

use serde::{Deserialize, Serialize};
use super::settings::ProtectionFlag;

/// Side effect requested by the dispatcher, carried out by the action executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Reply through the single-use reply handle of the triggering event
    ReplyToSender { text: String },
    /// Push to every configured administrator
    NotifyAdmins { text: String },
    RemoveMember { group_id: String, user_id: String },
    PersistToggle { group_id: String, flag: ProtectionFlag, value: bool },
}

impl Action {
    pub fn reply(text: impl Into<String>) -> Self {
        Action::ReplyToSender { text: text.into() }
    }

    pub fn notify_admins(text: impl Into<String>) -> Self {
        Action::NotifyAdmins { text: text.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::ReplyToSender { .. } => "reply",
            Action::NotifyAdmins { .. } => "notify_admins",
            Action::RemoveMember { .. } => "remove_member",
            Action::PersistToggle { .. } => "persist_toggle",
        }
    }
}
