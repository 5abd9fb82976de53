//! Intention models: concrete actions compiled from desires, and their outcomes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dispatchable action with action-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Dispatch a remote CI workflow with string inputs.
    TriggerWorkflow {
        workflow: String,
        parameters: BTreeMap<String, String>,
    },
    /// Run named housekeeping tasks on the local host.
    LocalOptimization { tasks: Vec<String> },
    /// Create a deployment on a hosting platform.
    DeployAgents { platform: String, count: u32 },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::TriggerWorkflow { .. } => "trigger_workflow",
            Action::LocalOptimization { .. } => "local_optimization",
            Action::DeployAgents { .. } => "deploy_agents",
        }
    }
}

/// An action plus the priority inherited from its source desire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intention {
    pub priority: i32,
    #[serde(flatten)]
    pub action: Action,
}

impl fmt::Display for Intention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (priority {})", self.action.name(), self.priority)
    }
}

/// Local housekeeping tasks the maintenance sink knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceTask {
    CleanupLogs,
    OptimizeProcesses,
}

impl MaintenanceTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceTask::CleanupLogs => "cleanup_logs",
            MaintenanceTask::OptimizeProcesses => "optimize_processes",
        }
    }

    /// Resolve a task name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cleanup_logs" => Some(MaintenanceTask::CleanupLogs),
            "optimize_processes" => Some(MaintenanceTask::OptimizeProcesses),
            _ => None,
        }
    }
}

/// Result of executing one admitted intention. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub intention: Intention,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Sink-specific result, e.g. the created deployment id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ExecutionOutcome {
    pub fn succeeded(intention: Intention, detail: Option<String>) -> Self {
        Self {
            intention,
            success: true,
            error: None,
            detail,
        }
    }

    pub fn failed(intention: Intention, error: impl Into<String>) -> Self {
        Self {
            intention,
            success: false,
            error: Some(error.into()),
            detail: None,
        }
    }
}
