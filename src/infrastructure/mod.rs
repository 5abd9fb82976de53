//! Infrastructure layer module
//!
//! Cross-cutting concerns and host-local capabilities:
//! - Configuration management
//! - Logging infrastructure and secret scrubbing
//! - Local CPU sampling
//!
//! Implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod resource_monitor;

pub use config::{ConfigError, ConfigLoader, ConfigSource};
pub use logging::{LogConfig, LoggerImpl, SecretScrubber};
pub use resource_monitor::SysinfoSampler;
