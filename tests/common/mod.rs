//! Common test utilities for integration tests
//!
//! In-memory fakes for every port, plus a builder that wires them into a
//! pipeline so tests can describe the observed world declaratively.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bdi_agent::domain::errors::{DomainError, DomainResult};
use bdi_agent::domain::models::{
    BeliefSnapshot, CloudStatus, MaintenanceTask, RevenueRecord, Service,
};
use bdi_agent::domain::ports::{
    AgentCensus, DeploymentCreator, MaintenanceRunner, MetricsSource, ResourceSampler,
    ServiceProbe, WorkflowDispatcher,
};
use bdi_agent::services::{
    ActionSinks, BeliefStore, DesireGenerator, IntentionExecutor, IntentionPlanner, Pipeline,
    ServiceProbes,
};

pub struct FixedProbe(pub Service, pub bool);

#[async_trait]
impl ServiceProbe for FixedProbe {
    fn service(&self) -> Service {
        self.0
    }
    async fn probe(&self) -> bool {
        self.1
    }
}

/// Metrics source returning a fixed record, or failing when `None`.
pub struct FixedMetrics(pub Option<RevenueRecord>);

#[async_trait]
impl MetricsSource for FixedMetrics {
    async fn fetch(&self) -> DomainResult<RevenueRecord> {
        self.0
            .clone()
            .ok_or_else(|| DomainError::Http("connection refused".to_string()))
    }
}

pub struct FixedSampler(pub Option<f32>);

#[async_trait]
impl ResourceSampler for FixedSampler {
    async fn sample_cpu(&self) -> Option<f32> {
        self.0
    }
}

/// Census returning a fixed count, or failing when `None`.
pub struct FixedCensus(pub Option<u32>);

#[async_trait]
impl AgentCensus for FixedCensus {
    async fn count_active(&self) -> DomainResult<u32> {
        self.0
            .ok_or_else(|| DomainError::Http("census unavailable".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingDispatcher {
    pub calls: Mutex<Vec<(String, BTreeMap<String, String>)>>,
    pub fail: bool,
}

impl RecordingDispatcher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowDispatcher for RecordingDispatcher {
    async fn dispatch(
        &self,
        workflow: &str,
        inputs: &BTreeMap<String, String>,
    ) -> DomainResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((workflow.to_string(), inputs.clone()));
        if self.fail {
            return Err(DomainError::UnexpectedStatus {
                status: 422,
                body: "workflow does not have workflow_dispatch trigger".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingDeployer {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl RecordingDeployer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeploymentCreator for RecordingDeployer {
    fn platform(&self) -> &str {
        "vercel"
    }

    async fn create_deployment(&self) -> DomainResult<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(DomainError::UnexpectedStatus {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(format!("dpl_{n}"))
    }
}

#[derive(Default)]
pub struct RecordingMaintenance {
    pub calls: Mutex<Vec<MaintenanceTask>>,
}

impl RecordingMaintenance {
    pub fn calls(&self) -> Vec<MaintenanceTask> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MaintenanceRunner for RecordingMaintenance {
    async fn run(&self, task: MaintenanceTask) -> DomainResult<String> {
        self.calls.lock().unwrap().push(task);
        Ok(format!("{} done", task.as_str()))
    }
}

/// Declarative description of what the fakes report.
#[derive(Clone)]
pub struct World {
    pub services: CloudStatus,
    pub cpu: Option<f32>,
    pub agents: Option<u32>,
    pub revenue: Option<RevenueRecord>,
}

impl World {
    /// Everything healthy: no rule triggers.
    pub fn healthy() -> Self {
        Self {
            services: CloudStatus {
                github_actions: true,
                vercel_api: true,
                supabase_db: true,
                huggingface: true,
            },
            cpu: Some(12.0),
            agents: Some(10),
            revenue: Some(RevenueRecord {
                current_month: 45_000.0,
                target: 50_000.0,
                growth_rate: 2.5,
                active_streams: 3,
            }),
        }
    }
}

/// Handles on the recording sinks of a pipeline.
#[derive(Clone, Default)]
pub struct Sinks {
    pub workflows: Arc<RecordingDispatcher>,
    pub deployments: Arc<RecordingDeployer>,
    pub maintenance: Arc<RecordingMaintenance>,
}

pub fn probes(world: &World) -> ServiceProbes {
    let probe = |service: Service| -> Arc<dyn ServiceProbe> {
        Arc::new(FixedProbe(service, world.services.get(service)))
    };
    ServiceProbes {
        github_actions: probe(Service::GithubActions),
        vercel_api: probe(Service::VercelApi),
        supabase_db: probe(Service::SupabaseDb),
        huggingface: probe(Service::Huggingface),
    }
}

/// Belief store over `world`, with `metrics` replacing the world's revenue.
pub fn belief_store_with_metrics(world: &World, metrics: Arc<dyn MetricsSource>) -> BeliefStore {
    BeliefStore::new(
        probes(world),
        metrics,
        Arc::new(FixedSampler(world.cpu)),
        Arc::new(FixedCensus(world.agents)),
    )
}

pub fn belief_store(world: &World) -> BeliefStore {
    belief_store_with_metrics(world, Arc::new(FixedMetrics(world.revenue.clone())))
}

pub fn executor(sinks: &Sinks) -> IntentionExecutor {
    IntentionExecutor::new(ActionSinks {
        workflows: sinks.workflows.clone(),
        deployments: sinks.deployments.clone(),
        maintenance: sinks.maintenance.clone(),
    })
}

pub fn pipeline_from(beliefs: BeliefStore, sinks: &Sinks) -> Pipeline {
    Pipeline::new(
        beliefs,
        DesireGenerator::default(),
        IntentionPlanner::default(),
        executor(sinks),
    )
}

pub fn pipeline_with(world: &World, sinks: &Sinks) -> Pipeline {
    pipeline_from(belief_store(world), sinks)
}

pub fn pipeline(world: &World) -> (Pipeline, Sinks) {
    let sinks = Sinks::default();
    (pipeline_with(world, &sinks), sinks)
}

/// A valid snapshot with the given revenue and agent count, all else healthy.
pub fn snapshot(current_month: f64, target: f64, agents: u32, health: u8) -> BeliefSnapshot {
    BeliefSnapshot {
        system_health: health,
        resource_usage: 10.0,
        active_agent_count: agents,
        revenue_metrics: RevenueRecord {
            current_month,
            target,
            growth_rate: 0.0,
            active_streams: 0,
        },
        cloud_status: CloudStatus::default(),
        last_updated: Utc::now(),
    }
}
