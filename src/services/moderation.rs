//! Moderation pipeline
//!
//! Runs dispatch and execution for one event while holding a lock scoped to
//! the event's group, so toggles of one group are never interleaved while
//! different groups proceed in parallel.

use std::sync::Arc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error};
use crate::handlers::Dispatcher;
use crate::models::{EventContext, InboundEvent};
use crate::services::notification::{ActionExecutor, ExecutionReport};
use crate::utils::errors::Result;
use crate::utils::logging::log_group_event;

#[derive(Clone)]
pub struct ModerationService {
    dispatcher: Dispatcher,
    executor: ActionExecutor,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ModerationService {
    pub fn new(dispatcher: Dispatcher, executor: ActionExecutor) -> Self {
        Self {
            dispatcher,
            executor,
            locks: Arc::new(DashMap::new()),
        }
    }

    fn group_lock(&self, group_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(group_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the group's lock entry once no task holds or awaits it
    fn release_group_lock(&self, group_id: &str) {
        self.locks.remove_if(group_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Process one event to completion
    ///
    /// Storage errors while deciding are returned; execution failures are
    /// absorbed by the executor.
    pub async fn process(
        &self,
        ctx: &EventContext,
        event: &InboundEvent,
        reply_token: Option<&str>,
    ) -> Result<ExecutionReport> {
        let Some(group_id) = ctx.source.group_id() else {
            debug!(kind = event.kind(), "Skipping non-group event");
            return Ok(ExecutionReport::default());
        };

        let lock = self.group_lock(group_id);
        let result = {
            let _guard = lock.lock().await;
            self.process_locked(group_id, ctx, event, reply_token).await
        };
        drop(lock);
        self.release_group_lock(group_id);

        result
    }

    async fn process_locked(
        &self,
        group_id: &str,
        ctx: &EventContext,
        event: &InboundEvent,
        reply_token: Option<&str>,
    ) -> Result<ExecutionReport> {
        log_group_event(group_id, event.kind(), ctx.source.user_id(), None);

        let actions = match self.dispatcher.dispatch(ctx, event).await {
            Ok(actions) => actions,
            Err(e) => {
                error!(group_id = group_id, error = %e, "Failed to dispatch event");
                return Err(e);
            }
        };

        if actions.is_empty() {
            return Ok(ExecutionReport::default());
        }

        Ok(self.executor.execute(group_id, reply_token, actions).await)
    }
}
