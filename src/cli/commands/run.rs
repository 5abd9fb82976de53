//! `run`: drive the control loop until Ctrl-C.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{init_logging, load_config};
use crate::application::AgentRuntime;

pub async fn execute(config_path: Option<PathBuf>, no_dashboard: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let _logger = init_logging(&config, false)?;

    let runtime = AgentRuntime::from_config(config).context("failed to build agent")?;
    runtime.run(!no_dashboard, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the loop can only be stopped by killing it
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
