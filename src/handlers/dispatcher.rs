//! Event dispatcher
//!
//! Sequences one inbound group event through settings initialization, the
//! rule engine and the command parser, producing the ordered actions for the
//! executor. The dispatcher itself performs no outbound calls.

use std::sync::Arc;
use tracing::{debug, info};
use crate::config::{FeaturesConfig, ModerationConfig};
use crate::database::SettingsStore;
use crate::models::{Action, Actor, EventContext, GroupSettings, InboundEvent, JoinedMember};
use crate::services::AuthService;
use crate::utils::errors::{GroupGuardError, Result};
use crate::utils::logging::{log_admin_action, log_group_event, log_violation};
use super::commands::{self, Command};
use super::rules::{RuleEngine, Severity};
use super::templates;

#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn SettingsStore>,
    auth: AuthService,
    rules: RuleEngine,
    welcome_message: String,
    placeholder_name: String,
    features: FeaturesConfig,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        auth: AuthService,
        moderation: &ModerationConfig,
        features: &FeaturesConfig,
    ) -> Self {
        let rules = RuleEngine::new(moderation.severity.clone())
            .with_group_names(moderation.group_names.clone());

        Self {
            store,
            auth,
            rules,
            welcome_message: moderation.welcome_message.clone(),
            placeholder_name: moderation.placeholder_name.clone(),
            features: features.clone(),
        }
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// Load the group's settings, creating the default record on first contact
    pub async fn ensure_settings(&self, group_id: &str) -> Result<GroupSettings> {
        match self.store.get(group_id).await {
            Ok(settings) => Ok(settings),
            Err(GroupGuardError::SettingsNotFound { .. }) => {
                log_group_event(group_id, "settings_initialized", None, None);
                self.store.init(group_id).await
            }
            Err(e) => Err(e),
        }
    }

    /// Decide the actions for one event
    ///
    /// Events outside a group are ignored. Storage errors are returned; no
    /// outbound call happens here.
    pub async fn dispatch(&self, ctx: &EventContext, event: &InboundEvent) -> Result<Vec<Action>> {
        let Some(group_id) = ctx.source.group_id() else {
            debug!(kind = event.kind(), "Ignoring event outside a group");
            return Ok(Vec::new());
        };

        let settings = self.ensure_settings(group_id).await?;

        if let InboundEvent::MemberJoined { members } = event {
            return Ok(self.welcome(group_id, members));
        }

        let Some(user_id) = ctx.source.user_id() else {
            debug!(group_id = group_id, "Ignoring group event without a sender");
            return Ok(Vec::new());
        };

        let display_name = ctx.sender_name.clone().unwrap_or_else(|| self.placeholder_name.clone());
        let actor = self.auth.actor(group_id, user_id, display_name);

        let actions = self.check_rules(event, &actor, &settings);
        if !actions.is_empty() {
            return Ok(actions);
        }

        let InboundEvent::Text { text, .. } = event else {
            return Ok(Vec::new());
        };

        Ok(self.run_command(commands::parse(text), &actor, &settings))
    }

    fn check_rules(&self, event: &InboundEvent, actor: &Actor, settings: &GroupSettings) -> Vec<Action> {
        for rule in self.rules.violations(event, actor, settings) {
            let removed = self.rules.policy().severity(rule) == Severity::Remove;
            log_violation(&actor.group_id, &actor.user_id, rule.flag().key(), removed);
        }
        self.rules.evaluate(event, actor, settings)
    }

    fn run_command(&self, command: Command, actor: &Actor, settings: &GroupSettings) -> Vec<Action> {
        if !actor.is_admin {
            return match command {
                Command::KickSelf if self.features.self_kick => {
                    log_group_event(&actor.group_id, "self_kick", Some(actor.user_id.as_str()), None);
                    vec![
                        Action::reply(templates::SELF_KICK_FAREWELL),
                        Action::RemoveMember {
                            group_id: actor.group_id.clone(),
                            user_id: actor.user_id.clone(),
                        },
                    ]
                }
                _ => Vec::new(),
            };
        }

        match command {
            Command::ShowUserId => vec![Action::reply(actor.user_id.clone())],
            Command::ShowHelp => vec![Action::reply(templates::HELP_TEXT)],
            Command::ShowStatus => vec![Action::reply(templates::status_report(settings))],
            Command::ToggleFlag { flag, enabled, display_name } => {
                let details = format!("{}={}", flag.key(), enabled);
                log_admin_action(&actor.user_id, "toggle", Some(actor.group_id.as_str()), Some(details.as_str()));
                vec![
                    Action::PersistToggle {
                        group_id: actor.group_id.clone(),
                        flag,
                        value: enabled,
                    },
                    Action::reply(templates::toggle_confirmation(display_name, enabled)),
                ]
            }
            Command::KickSelf if self.features.self_kick => {
                vec![Action::reply(templates::ADMIN_SELF_KICK_REFUSAL)]
            }
            Command::KickSelf | Command::NoCommand => Vec::new(),
        }
    }

    fn welcome(&self, group_id: &str, members: &[JoinedMember]) -> Vec<Action> {
        if !self.features.welcome_new_members {
            return Vec::new();
        }

        members
            .iter()
            .map(|member| {
                info!(group_id = group_id, user_id = %member.user_id, "Welcoming new member");
                let name = member.display_name.as_deref().unwrap_or(&self.placeholder_name);
                Action::reply(templates::welcome(&self.welcome_message, name))
            })
            .collect()
    }
}
