//! Authentication service implementation
//!
//! Admin status comes from the static allow-list in the configuration; this
//! service only answers membership questions and builds per-event actors.

use std::collections::HashSet;
use tracing::debug;
use crate::models::Actor;

#[derive(Debug, Clone)]
pub struct AuthService {
    admin_ids: Vec<String>,
    lookup: HashSet<String>,
}

impl AuthService {
    pub fn new(admin_ids: Vec<String>) -> Self {
        let lookup = admin_ids.iter().cloned().collect();
        Self { admin_ids, lookup }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.lookup.contains(user_id)
    }

    /// Administrators in configuration order, used as push targets
    pub fn admin_ids(&self) -> &[String] {
        &self.admin_ids
    }

    /// Build the actor for one event
    pub fn actor(&self, group_id: &str, user_id: &str, display_name: String) -> Actor {
        let is_admin = self.is_admin(user_id);
        debug!(user_id = user_id, group_id = group_id, is_admin = is_admin, "Resolved actor");

        Actor {
            user_id: user_id.to_string(),
            group_id: group_id.to_string(),
            display_name,
            is_admin,
        }
    }
}
