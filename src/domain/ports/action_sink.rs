//! Action sink ports - capabilities intentions are executed through.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::errors::DomainResult;
use crate::domain::models::MaintenanceTask;

/// Dispatches a remote CI workflow.
#[async_trait]
pub trait WorkflowDispatcher: Send + Sync {
    /// Trigger `workflow` with string `inputs`.
    ///
    /// Succeeds only when the remote accepted the dispatch.
    async fn dispatch(&self, workflow: &str, inputs: &BTreeMap<String, String>)
        -> DomainResult<()>;
}

/// Creates deployments on a hosting platform.
#[async_trait]
pub trait DeploymentCreator: Send + Sync {
    /// Platform name this creator deploys to (e.g. `"vercel"`).
    fn platform(&self) -> &str;

    /// Create one deployment and return its identifier.
    async fn create_deployment(&self) -> DomainResult<String>;
}

/// Runs local housekeeping tasks.
#[async_trait]
pub trait MaintenanceRunner: Send + Sync {
    /// Run one task, returning a short human-readable summary.
    async fn run(&self, task: MaintenanceTask) -> DomainResult<String>;
}
