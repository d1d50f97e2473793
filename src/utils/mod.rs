//! Utility functions and helpers for rewrite-relay.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret redaction for log lines.

pub mod logging;
