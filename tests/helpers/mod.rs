//! Test helpers module
//!
//! This module provides utilities for testing the GroupGuard bot end to end:
//! a mock LINE Messaging API, webhook payload builders and a test context
//! wiring the real router to both.

#![allow(dead_code)]

pub mod line_mock;
pub mod test_context;
pub mod test_data;

pub use line_mock::*;
pub use test_context::*;
pub use test_data::*;
