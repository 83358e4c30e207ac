//! Middleware module
//!
//! This module contains request processing applied before dispatch

pub mod logging;
pub mod signature;

// Re-export commonly used middleware
pub use logging::LoggingMiddleware;
pub use signature::{verify_signature, SIGNATURE_HEADER};
