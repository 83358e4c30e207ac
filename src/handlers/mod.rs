//! Moderation handlers
//!
//! This module contains the decision core of the bot:
//! - Rule engine for protection violations
//! - Command parser for administrator commands
//! - Dispatcher sequencing both per inbound event

pub mod commands;
pub mod dispatcher;
pub mod rules;
pub mod templates;

pub use commands::{parse, Command};
pub use dispatcher::Dispatcher;
pub use rules::{Rule, RuleEngine, Severity, SeverityPolicy};
