//! `config show`: print the effective configuration.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use super::load_config;
use crate::cli::output::{output, CommandOutput};
use crate::cli::ConfigCommands;
use crate::domain::models::Config;

/// Configuration with every credential masked.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RedactedConfig(Config);

impl RedactedConfig {
    pub fn new(config: &Config) -> Self {
        Self(config.redacted())
    }
}

impl CommandOutput for RedactedConfig {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.0).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

pub fn execute(command: ConfigCommands, config_path: Option<PathBuf>, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = load_config(config_path).context("cannot show configuration")?;
            output(&RedactedConfig::new(&config), json_mode);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Secret;

    #[test]
    fn test_show_masks_credentials() {
        let mut config = Config::default();
        config.github.token = Secret::new("ghp_verysecretvalue");
        let shown = RedactedConfig::new(&config);

        assert!(!shown.to_human().contains("ghp_verysecretvalue"));
        let json = shown.to_json();
        assert_eq!(json["github"]["token"], "********");
        assert_eq!(json["agent"]["cycle_interval_secs"], 30);
    }
}
