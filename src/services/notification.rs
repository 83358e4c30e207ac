//! Action execution
//!
//! This service carries out the actions decided for one event against the
//! messaging platform and the settings store. Execution is best-effort: a
//! failed reply, removal or persist is reported to administrators, a failed
//! administrator push is only logged, and nothing is retried.

use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::config::{group_display_name, GroupName};
use crate::database::SettingsStore;
use crate::handlers::templates;
use crate::models::Action;
use crate::services::line::{MessagingClient, MAX_REPLY_MESSAGES};
use crate::utils::logging::log_api_error;

/// Outcome counters for one execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub replies_sent: usize,
    pub notifications_sent: usize,
    pub members_removed: usize,
    pub toggles_persisted: usize,
    pub failures: usize,
}

#[derive(Clone)]
pub struct ActionExecutor {
    client: Arc<dyn MessagingClient>,
    store: Arc<dyn SettingsStore>,
    admin_ids: Vec<String>,
    group_names: Vec<GroupName>,
}

impl ActionExecutor {
    pub fn new(
        client: Arc<dyn MessagingClient>,
        store: Arc<dyn SettingsStore>,
        admin_ids: Vec<String>,
        group_names: Vec<GroupName>,
    ) -> Self {
        Self { client, store, admin_ids, group_names }
    }

    /// Execute actions in order
    ///
    /// All replies share the event's single reply call, sent at the position
    /// of the first reply. A confirmation reply is withheld when the toggle
    /// it confirms could not be persisted.
    pub async fn execute(&self, group_id: &str, reply_token: Option<&str>, actions: Vec<Action>) -> ExecutionReport {
        let mut report = ExecutionReport::default();
        let mut failures: Vec<String> = Vec::new();
        let mut replies_sent = false;
        let mut persist_failed = false;

        for (position, action) in actions.iter().enumerate() {
            debug!(group_id = group_id, action = action.kind(), "Executing action");

            match action {
                Action::ReplyToSender { .. } => {
                    if replies_sent {
                        continue;
                    }
                    replies_sent = true;

                    if persist_failed {
                        debug!(group_id = group_id, "Skipping replies after failed persist");
                        continue;
                    }

                    let texts = reply_texts(&actions[position..]);
                    if let Err(e) = self.send_replies(reply_token, &texts).await {
                        report.failures += 1;
                        log_api_error("reply", &e, Some(group_id));
                        failures.push(templates::reply_failed(self.group_name(group_id), &e));
                    } else {
                        report.replies_sent += texts.len().min(MAX_REPLY_MESSAGES);
                    }
                }
                Action::NotifyAdmins { text } => {
                    report.notifications_sent += self.notify_admins(text).await;
                }
                Action::RemoveMember { group_id: target_group, user_id } => {
                    match self.client.remove_member(target_group, user_id).await {
                        Ok(()) => {
                            info!(group_id = %target_group, user_id = %user_id, "Member removed");
                            report.members_removed += 1;
                        }
                        Err(e) => {
                            report.failures += 1;
                            log_api_error("remove_member", &e.to_string(), Some(target_group.as_str()));
                            failures.push(templates::remove_failed(
                                self.group_name(target_group),
                                user_id,
                                &e.to_string(),
                            ));
                        }
                    }
                }
                Action::PersistToggle { group_id: target_group, flag, value } => {
                    match self.store.set(target_group, *flag, *value).await {
                        Ok(()) => {
                            info!(group_id = %target_group, flag = %flag, value = value, "Protection flag updated");
                            report.toggles_persisted += 1;
                        }
                        Err(e) => {
                            persist_failed = true;
                            report.failures += 1;
                            warn!(group_id = %target_group, flag = %flag, error = %e, "Failed to persist toggle");
                            failures.push(templates::persist_failed(
                                self.group_name(target_group),
                                flag.display_name(),
                                &e.to_string(),
                            ));
                        }
                    }
                }
            }
        }

        for text in failures {
            report.notifications_sent += self.notify_admins(&text).await;
        }

        report
    }

    async fn send_replies(&self, reply_token: Option<&str>, texts: &[String]) -> std::result::Result<(), String> {
        let Some(token) = reply_token else {
            return Err("no reply token".to_string());
        };
        self.client.reply(token, texts).await.map_err(|e| e.to_string())
    }

    /// Push to every administrator, returning how many pushes succeeded
    pub async fn notify_admins(&self, text: &str) -> usize {
        let mut sent = 0;
        for admin_id in &self.admin_ids {
            match self.client.push(admin_id, text).await {
                Ok(()) => sent += 1,
                Err(e) => log_api_error("push", &e.to_string(), Some(admin_id.as_str())),
            }
        }
        sent
    }

    fn group_name<'a>(&'a self, group_id: &'a str) -> &'a str {
        group_display_name(&self.group_names, group_id)
    }
}

fn reply_texts(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::ReplyToSender { text } => Some(text.clone()),
            _ => None,
        })
        .collect()
}
