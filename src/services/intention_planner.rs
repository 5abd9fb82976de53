//! Intention planning: compile desires into ordered, dispatchable actions.

use std::collections::BTreeMap;

use crate::domain::models::{Action, Desire, Goal, Intention, MaintenanceTask};

/// Platform agent deployments are created on.
pub const DEPLOY_PLATFORM: &str = "vercel";

/// Compiles desires into intentions, one rule per desire kind.
#[derive(Debug, Clone)]
pub struct IntentionPlanner {
    workflow: String,
}

impl IntentionPlanner {
    /// `workflow` names the remote workflow revenue optimization dispatches.
    pub fn new(workflow: impl Into<String>) -> Self {
        Self {
            workflow: workflow.into(),
        }
    }

    /// Compile `desires` and order the result by descending priority.
    ///
    /// The sort is stable, so intentions of equal priority keep the order of
    /// the desires they came from. Pure: identical input yields identical
    /// output.
    pub fn plan(&self, desires: &[Desire]) -> Vec<Intention> {
        let mut intentions: Vec<Intention> = desires.iter().map(|d| self.compile(d)).collect();
        intentions.sort_by(|a, b| b.priority.cmp(&a.priority));

        tracing::debug!(
            desires = desires.len(),
            intentions = intentions.len(),
            "planned intentions"
        );
        intentions
    }

    /// Compile a single desire. `Goal` is closed, so every kind has a rule.
    fn compile(&self, desire: &Desire) -> Intention {
        let action = match &desire.goal {
            Goal::RevenueOptimization {
                target_increase,
                strategy,
            } => {
                let mut parameters = BTreeMap::new();
                parameters.insert("target_increase".to_string(), target_increase.to_string());
                parameters.insert("strategy".to_string(), strategy.clone());
                Action::TriggerWorkflow {
                    workflow: self.workflow.clone(),
                    parameters,
                }
            }
            Goal::SystemOptimization { .. } => Action::LocalOptimization {
                tasks: vec![
                    MaintenanceTask::CleanupLogs.as_str().to_string(),
                    MaintenanceTask::OptimizeProcesses.as_str().to_string(),
                ],
            },
            Goal::AgentScaling { target_agents, .. } => Action::DeployAgents {
                platform: DEPLOY_PLATFORM.to_string(),
                count: *target_agents,
            },
        };

        Intention {
            priority: desire.priority,
            action,
        }
    }
}

impl Default for IntentionPlanner {
    fn default() -> Self {
        Self::new("revenue-optimization.yml")
    }
}
