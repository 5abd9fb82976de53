//! Command implementations.

pub mod config;
pub mod cycle;
pub mod run;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::models::Config;
use crate::infrastructure::{ConfigLoader, ConfigSource, LogConfig, LoggerImpl};

/// Load and validate configuration; any failure is fatal to the command.
pub fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    let source = ConfigSource::detect(explicit);
    ConfigLoader::load(&source).with_context(|| match &source {
        ConfigSource::File(path) => format!("invalid configuration in {}", path.display()),
        ConfigSource::Environment => "invalid configuration in environment".to_string(),
    })
}

/// Install the global logger described by `config`.
///
/// Console output is suppressed when stdout carries JSON for another program.
pub fn init_logging(config: &Config, json_mode: bool) -> Result<LoggerImpl> {
    let mut log_config = LogConfig::from(&config.logging);
    log_config.enable_console = log_config.enable_console && !json_mode;
    LoggerImpl::init(&log_config)
}
