//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides, or environment-only mode
//! - Fail-fast validation of required credentials

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ConfigSource};
