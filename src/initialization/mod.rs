//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (env_logger with plain or JSON formatting)
//! - HTTP client (timeouts, user agent, redirect policy)

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
