//! Belief refresh: assemble one snapshot from independent concurrent probes.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::models::{BeliefSnapshot, CloudStatus, RevenueRecord, Service};
use crate::domain::ports::{AgentCensus, MetricsSource, ResourceSampler, ServiceProbe};

/// CPU usage assumed when the host cannot be sampled.
pub const FALLBACK_RESOURCE_USAGE: f32 = 5.0;

/// Default upper bound on any single sub-fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One probe per known service.
///
/// A fixed-shape set, so a snapshot can never silently miss a service.
#[derive(Clone)]
pub struct ServiceProbes {
    pub github_actions: Arc<dyn ServiceProbe>,
    pub vercel_api: Arc<dyn ServiceProbe>,
    pub supabase_db: Arc<dyn ServiceProbe>,
    pub huggingface: Arc<dyn ServiceProbe>,
}

impl ServiceProbes {
    fn get(&self, service: Service) -> &Arc<dyn ServiceProbe> {
        match service {
            Service::GithubActions => &self.github_actions,
            Service::VercelApi => &self.vercel_api,
            Service::SupabaseDb => &self.supabase_db,
            Service::Huggingface => &self.huggingface,
        }
    }
}

/// Builds belief snapshots.
///
/// `refresh` never fails: each sub-fetch that errors or overruns its time
/// bound contributes a safe default instead.
#[derive(Clone)]
pub struct BeliefStore {
    probes: ServiceProbes,
    metrics: Arc<dyn MetricsSource>,
    sampler: Arc<dyn ResourceSampler>,
    census: Arc<dyn AgentCensus>,
    fetch_timeout: Duration,
}

impl BeliefStore {
    pub fn new(
        probes: ServiceProbes,
        metrics: Arc<dyn MetricsSource>,
        sampler: Arc<dyn ResourceSampler>,
        census: Arc<dyn AgentCensus>,
    ) -> Self {
        Self {
            probes,
            metrics,
            sampler,
            census,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Override the per-fetch time bound.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Observe the world and assemble a fresh snapshot.
    ///
    /// All sub-fetches run concurrently and are joined before assembly;
    /// `last_updated` is taken once everything has been joined.
    pub async fn refresh(&self) -> BeliefSnapshot {
        let (resource_usage, cloud_status, revenue_metrics, active_agent_count) = tokio::join!(
            self.sample_resources(),
            self.check_services(),
            self.fetch_revenue(),
            self.count_agents(),
        );

        let snapshot = BeliefSnapshot {
            system_health: cloud_status.health_score(),
            resource_usage,
            active_agent_count,
            revenue_metrics,
            cloud_status,
            last_updated: Utc::now(),
        };

        tracing::info!(
            system_health = snapshot.system_health,
            resource_usage = snapshot.resource_usage,
            active_agents = snapshot.active_agent_count,
            healthy_services = snapshot.cloud_status.healthy_count(),
            "beliefs updated"
        );
        snapshot
    }

    async fn sample_resources(&self) -> f32 {
        match self.bounded("resource_sampler", self.sampler.sample_cpu()).await {
            Some(Some(cpu)) if cpu.is_finite() => cpu.clamp(0.0, 100.0),
            _ => {
                tracing::debug!(
                    fallback = FALLBACK_RESOURCE_USAGE,
                    "cpu sampling unavailable, using fallback"
                );
                FALLBACK_RESOURCE_USAGE
            }
        }
    }

    async fn check_services(&self) -> CloudStatus {
        let checks = Service::ALL.map(|service| {
            let probe = Arc::clone(self.probes.get(service));
            async move {
                let healthy = self
                    .bounded(service.as_str(), async move { probe.probe().await })
                    .await
                    .unwrap_or(false);
                (service, healthy)
            }
        });

        let mut status = CloudStatus::default();
        for (service, healthy) in futures::future::join_all(checks).await {
            if !healthy {
                tracing::warn!(service = %service, "service unhealthy");
            }
            status.set(service, healthy);
        }
        status
    }

    async fn fetch_revenue(&self) -> RevenueRecord {
        match self.bounded("metrics_source", self.metrics.fetch()).await {
            Some(Ok(record)) if record.target > 0.0 => record,
            Some(Ok(record)) => {
                tracing::warn!(
                    revenue_target = record.target,
                    "metrics record has non-positive target, using placeholder"
                );
                RevenueRecord::placeholder()
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "metrics fetch failed, using placeholder");
                RevenueRecord::placeholder()
            }
            None => RevenueRecord::placeholder(),
        }
    }

    async fn count_agents(&self) -> u32 {
        match self.bounded("agent_census", self.census.count_active()).await {
            Some(Ok(count)) => count,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "agent census failed, assuming none active");
                0
            }
            None => 0,
        }
    }

    /// Run `fut` under the fetch time bound; `None` on overrun.
    async fn bounded<F: Future>(&self, what: &str, fut: F) -> Option<F::Output> {
        match tokio::time::timeout(self.fetch_timeout, fut).await {
            Ok(output) => Some(output),
            Err(_) => {
                tracing::warn!(
                    fetch = what,
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "belief fetch timed out"
                );
                None
            }
        }
    }
}
