//! Logging middleware
//!
//! This module provides logging for webhook deliveries and inbound events,
//! plus a small tracker for timing their processing.

use std::time::Instant;
use tracing::{debug, error, info, warn, Span};
use crate::models::{EventSource, InboundEvent};

/// Logging middleware for webhook traffic
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_event_content: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    pub fn new(log_event_content: bool, log_performance: bool) -> Self {
        Self {
            log_event_content,
            log_performance,
        }
    }

    /// Log a delivery before its events are parsed
    pub fn log_delivery(&self, body_len: usize, signed: bool) {
        debug!(body_len = body_len, signed = signed, "Webhook delivery received");
    }

    /// Log an inbound event
    pub fn log_event(&self, source: &EventSource, event: &InboundEvent) {
        let (chat_type, chat_id) = match source {
            EventSource::User { user_id } => ("user", user_id.as_str()),
            EventSource::Group { group_id, .. } => ("group", group_id.as_str()),
            EventSource::Room { room_id, .. } => ("room", room_id.as_str()),
        };

        match event {
            InboundEvent::Text { text, mentions } if self.log_event_content => {
                debug!(
                    chat_type = chat_type,
                    chat_id = chat_id,
                    user_id = source.user_id(),
                    text = %text,
                    mentions = mentions.len(),
                    "Text message received"
                );
            }
            InboundEvent::MemberJoined { members } => {
                info!(chat_type = chat_type, chat_id = chat_id, members = members.len(), "Members joined");
            }
            _ => {}
        }

        info!(
            chat_type = chat_type,
            chat_id = chat_id,
            user_id = source.user_id(),
            event_type = event.kind(),
            "Event processed"
        );
    }

    /// Log a rejected delivery
    pub fn log_rejected(&self, reason: &str) {
        warn!(reason = reason, "Webhook delivery rejected");
    }

    /// Log error with context
    pub fn log_error(&self, error: &dyn std::error::Error, context: &str, group_id: Option<&str>) {
        error!(
            error = %error,
            context = context,
            group_id = group_id,
            "Error occurred"
        );
    }

    /// Create a performance tracking span
    pub fn create_performance_span(&self, operation: &str) -> Option<PerformanceTracker> {
        if self.log_performance {
            Some(PerformanceTracker::new(operation.to_string()))
        } else {
            None
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, success: bool) {
        let duration_ms = self.start_time.elapsed().as_millis();

        if success {
            debug!(operation = %self.operation, duration_ms = duration_ms, "Operation completed");
        } else {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Operation failed");
        }

        if duration_ms > 1000 {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Slow operation detected");
        }
    }
}
