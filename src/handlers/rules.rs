//! Rule engine
//!
//! Pure decision function mapping an inbound event, its author and the group's
//! current settings to the moderation actions to take. Never touches storage
//! or the network.

use serde::{Deserialize, Serialize};
use crate::config::{group_display_name, GroupName};
use crate::models::{Action, Actor, GroupSettings, InboundEvent, ProtectionFlag};
use super::templates;

/// Number of mention spans in one message that counts as a mass mention
pub const MASS_MENTION_THRESHOLD: usize = 5;

const INVITE_LINK_MARKER: &str = "line.me/R/ti/g/";
const NOTE_KEYWORD: &str = "記事本";
const ALBUM_KEYWORD: &str = "相簿";

/// Moderation rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Mention,
    InviteLink,
    NoteKeyword,
    AlbumKeyword,
    StickerFlood,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::Mention,
        Rule::InviteLink,
        Rule::NoteKeyword,
        Rule::AlbumKeyword,
        Rule::StickerFlood,
    ];

    /// Flag gating this rule
    pub fn flag(self) -> ProtectionFlag {
        match self {
            Rule::Mention => ProtectionFlag::MentionProtect,
            Rule::InviteLink => ProtectionFlag::InviteLinkProtect,
            Rule::NoteKeyword => ProtectionFlag::NoteProtect,
            Rule::AlbumKeyword => ProtectionFlag::AlbumProtect,
            Rule::StickerFlood => ProtectionFlag::StickerProtect,
        }
    }

    /// Reason quoted in warnings and administrator notices
    pub fn reason(self) -> &'static str {
        match self {
            Rule::Mention => "未經授權使用 標記全體",
            Rule::InviteLink => "未經授權張貼 群組邀請網址",
            Rule::NoteKeyword => "未經授權使用 記事本",
            Rule::AlbumKeyword => "未經授權使用 相簿",
            Rule::StickerFlood => "貼圖洗版",
        }
    }

    /// A mention violation ends evaluation for the event
    pub fn is_terminal(self) -> bool {
        matches!(self, Rule::Mention)
    }

    /// Whether the event matches this rule's trigger, ignoring the flag
    pub fn matches(self, event: &InboundEvent) -> bool {
        match (self, event) {
            (Rule::Mention, InboundEvent::Text { text, mentions }) => {
                text.to_lowercase().contains("@all")
                    || text.contains("@所有人")
                    || mentions.len() >= MASS_MENTION_THRESHOLD
            }
            (Rule::InviteLink, InboundEvent::Text { text, .. }) => text.contains(INVITE_LINK_MARKER),
            (Rule::NoteKeyword, InboundEvent::Text { text, .. }) => text.contains(NOTE_KEYWORD),
            (Rule::AlbumKeyword, InboundEvent::Text { text, .. }) => text.contains(ALBUM_KEYWORD),
            (Rule::StickerFlood, InboundEvent::Sticker) => true,
            _ => false,
        }
    }
}

/// What happens to the offender once the warning is out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warn the sender and notify administrators
    Warn,
    /// Warn, notify, then remove the sender from the group
    Remove,
}

/// Per-rule severity table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPolicy {
    pub mention: Severity,
    pub invite_link: Severity,
    pub note_keyword: Severity,
    pub album_keyword: Severity,
    pub sticker_flood: Severity,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            mention: Severity::Remove,
            invite_link: Severity::Warn,
            note_keyword: Severity::Warn,
            album_keyword: Severity::Warn,
            sticker_flood: Severity::Warn,
        }
    }
}

impl SeverityPolicy {
    pub fn severity(&self, rule: Rule) -> Severity {
        match rule {
            Rule::Mention => self.mention,
            Rule::InviteLink => self.invite_link,
            Rule::NoteKeyword => self.note_keyword,
            Rule::AlbumKeyword => self.album_keyword,
            Rule::StickerFlood => self.sticker_flood,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    policy: SeverityPolicy,
    group_names: Vec<GroupName>,
}

impl RuleEngine {
    pub fn new(policy: SeverityPolicy) -> Self {
        Self { policy, group_names: Vec::new() }
    }

    pub fn with_group_names(mut self, group_names: Vec<GroupName>) -> Self {
        self.group_names = group_names;
        self
    }

    pub fn policy(&self) -> &SeverityPolicy {
        &self.policy
    }

    /// Rules that fire for this event, honoring admin exemption and the
    /// terminal mention rule
    pub fn violations(&self, event: &InboundEvent, actor: &Actor, settings: &GroupSettings) -> Vec<Rule> {
        if actor.is_admin {
            return Vec::new();
        }

        let mut fired = Vec::new();
        for rule in Rule::ALL {
            if settings.is_enabled(rule.flag()) && rule.matches(event) {
                fired.push(rule);
                if rule.is_terminal() {
                    break;
                }
            }
        }
        fired
    }

    /// Actions for every violation in the event; empty when nothing fired
    pub fn evaluate(&self, event: &InboundEvent, actor: &Actor, settings: &GroupSettings) -> Vec<Action> {
        let group_name = self.group_name(&actor.group_id);
        let mut actions = Vec::new();

        for rule in self.violations(event, actor, settings) {
            actions.push(Action::reply(templates::violation_warning(&actor.display_name, rule.reason())));
            actions.push(Action::notify_admins(templates::admin_violation_notice(
                &actor.display_name,
                group_name,
                rule.reason(),
            )));

            if self.policy.severity(rule) == Severity::Remove {
                actions.push(Action::RemoveMember {
                    group_id: actor.group_id.clone(),
                    user_id: actor.user_id.clone(),
                });
            }
        }

        actions
    }

    fn group_name<'a>(&'a self, group_id: &'a str) -> &'a str {
        group_display_name(&self.group_names, group_id)
    }
}
