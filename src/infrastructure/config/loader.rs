use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project-local configuration file.
pub const DEFAULT_CONFIG_PATH: &str = ".bdi/config.yaml";

/// Prefix of configuration environment variables (`BDI_GITHUB__TOKEN`, ...).
pub const ENV_PREFIX: &str = "BDI_";

/// Set to `env` to force environment-only configuration.
pub const CONFIG_SOURCE_VAR: &str = "BDI_CONFIG_SOURCE";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingField(&'static str),

    #[error("Invalid {0}: must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// YAML file, with `BDI_*` environment overrides on top.
    File(PathBuf),
    /// Environment variables only, for managed hosting.
    Environment,
}

impl ConfigSource {
    /// Pick a source: an explicit path wins, then `BDI_CONFIG_SOURCE=env`,
    /// then the default file if it exists, else the environment.
    pub fn detect(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path);
        }
        if std::env::var(CONFIG_SOURCE_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("env")) {
            return Self::Environment;
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            Self::File(default)
        } else {
            Self::Environment
        }
    }
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from `source`
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The YAML file, in file mode
    /// 3. Environment variables (`BDI_` prefix, `__` nesting)
    ///
    /// Any validation failure is returned as an error; callers treat it as
    /// fatal.
    pub fn load(source: &ConfigSource) -> Result<Config> {
        let config = match source {
            ConfigSource::File(path) => Self::load_from_file(path)?,
            ConfigSource::Environment => Self::load_from_env()?,
        };
        Ok(config)
    }

    /// Load configuration from a specific file plus environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn load_from_env() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from environment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let required = [
            ("github.owner", config.github.owner.trim().is_empty()),
            ("github.repo", config.github.repo.trim().is_empty()),
            ("github.token", config.github.token.is_empty()),
            ("github.workflow", config.github.workflow.trim().is_empty()),
            ("vercel.project_id", config.vercel.project_id.trim().is_empty()),
            ("vercel.token", config.vercel.token.is_empty()),
            ("supabase.url", config.supabase.url.trim().is_empty()),
            ("supabase.key", config.supabase.key.is_empty()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
            return Err(ConfigError::MissingField(*field));
        }

        if config.agent.cycle_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration("agent.cycle_interval_secs"));
        }
        if config.agent.error_backoff_secs == 0 {
            return Err(ConfigError::ZeroDuration("agent.error_backoff_secs"));
        }
        if config.probes.timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("probes.timeout_secs"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if !config.supabase.url.starts_with("http://") && !config.supabase.url.starts_with("https://")
        {
            return Err(ConfigError::ValidationFailed(format!(
                "supabase.url must be an http(s) URL, got '{}'",
                config.supabase.url
            )));
        }

        Ok(())
    }
}
