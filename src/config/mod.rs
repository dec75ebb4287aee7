//! Configuration Module
//!
//! Handles client configuration loading and validation.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ApiKey, ClientConfig, FileConfig, RateLimitConfig, RetryConfig};
