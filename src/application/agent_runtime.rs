//! Agent runtime - wires adapters into the control loop and runs it
//! alongside the dashboard.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::adapters::{
    probe_set, DashboardServer, GitHubWorkflowClient, LocalMaintenance, SupabaseMetricsSource,
    VercelClient,
};
use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentState, Config};
use crate::domain::ports::ResourceSampler;
use crate::infrastructure::SysinfoSampler;
use crate::services::{
    ActionSinks, BeliefStore, ControlLoop, CycleReport, DesireGenerator, IntentionExecutor,
    IntentionPlanner, LoopConfig, Pipeline,
};

/// A configured agent: the control loop plus its dashboard settings.
pub struct AgentRuntime {
    config: Config,
    control: ControlLoop,
}

impl AgentRuntime {
    /// Build every adapter from `config` and assemble the pipeline.
    ///
    /// `config` is expected to have passed validation.
    pub fn from_config(config: Config) -> DomainResult<Self> {
        let sampler: Arc<dyn ResourceSampler> = Arc::new(SysinfoSampler::new());
        let vercel = Arc::new(VercelClient::new(&config.vercel, &config.github)?);

        let beliefs = BeliefStore::new(
            probe_set(&config)?,
            Arc::new(SupabaseMetricsSource::new(&config.supabase)?),
            Arc::clone(&sampler),
            vercel.clone(),
        );

        let executor = IntentionExecutor::new(ActionSinks {
            workflows: Arc::new(GitHubWorkflowClient::new(&config.github)?),
            deployments: vercel,
            maintenance: Arc::new(LocalMaintenance::new(&config.maintenance, sampler)),
        });

        let pipeline = Pipeline::new(
            beliefs,
            DesireGenerator::new(config.desires),
            IntentionPlanner::new(config.github.workflow.clone()),
            executor,
        );
        let control = ControlLoop::new(pipeline, LoopConfig::from(&config.agent));

        Ok(Self { config, control })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn subscribe(&self) -> watch::Receiver<AgentState> {
        self.control.subscribe()
    }

    /// Run exactly one cycle.
    pub async fn run_once(&self) -> DomainResult<CycleReport> {
        self.control.run_cycle(1).await
    }

    /// Run the loop, and the dashboard if `with_dashboard`, until `shutdown`
    /// resolves.
    ///
    /// On shutdown the current cycle is finished, `stopped` is published,
    /// and only then is the dashboard stopped.
    pub async fn run<F>(&self, with_dashboard: bool, shutdown: F) -> Result<u64>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (done_tx, mut done_rx) = watch::channel(false);

        let dashboard = if with_dashboard && self.config.dashboard.enabled {
            let server = DashboardServer::new(
                self.config.dashboard.clone(),
                self.config.agent.name.clone(),
                self.control.subscribe(),
            );
            Some(tokio::spawn(async move {
                let shutdown = async move {
                    let _ = done_rx.wait_for(|done| *done).await;
                };
                if let Err(e) = server.serve_with_shutdown(shutdown).await {
                    tracing::error!(error = %e, "dashboard server failed");
                }
            }))
        } else {
            None
        };

        let signal = tokio::spawn(async move {
            shutdown.await;
            tracing::info!("stop requested, finishing current cycle");
            let _ = stop_tx.send(true);
            // Keep the sender alive so the loop sees the request, not a hangup
            stop_tx.closed().await;
        });

        tracing::info!(agent = %self.config.agent.name, "agent starting");
        let cycles = self.control.run(stop_rx).await;
        signal.abort();

        let _ = done_tx.send(true);
        if let Some(handle) = dashboard {
            handle.await.context("dashboard task panicked")?;
        }

        tracing::info!(cycles, "agent stopped");
        Ok(cycles)
    }
}
