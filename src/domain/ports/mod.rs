//! Port trait definitions (Hexagonal Architecture)
//!
//! Capability interfaces the reasoning cycle calls through:
//! - Observation: ServiceProbe, MetricsSource, ResourceSampler, AgentCensus
//! - Action sinks: WorkflowDispatcher, DeploymentCreator, MaintenanceRunner
//!
//! Adapters under `crate::adapters` and `crate::infrastructure` implement
//! these against real services; tests substitute in-memory fakes.

pub mod action_sink;
pub mod observation;

pub use action_sink::{DeploymentCreator, MaintenanceRunner, WorkflowDispatcher};
pub use observation::{AgentCensus, MetricsSource, ResourceSampler, ServiceProbe};
