//! Intention execution: dispatch the top intentions to their action sinks.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Action, ExecutionOutcome, Intention, MaintenanceTask};
use crate::domain::ports::{DeploymentCreator, MaintenanceRunner, WorkflowDispatcher};
use crate::infrastructure::logging::SecretScrubber;

/// Maximum number of intentions executed per cycle.
pub const ADMISSION_CAP: usize = 3;

/// The capabilities intentions are dispatched to.
#[derive(Clone)]
pub struct ActionSinks {
    pub workflows: Arc<dyn WorkflowDispatcher>,
    pub deployments: Arc<dyn DeploymentCreator>,
    pub maintenance: Arc<dyn MaintenanceRunner>,
}

/// Executes planned intentions with per-intention failure isolation.
///
/// Only the first [`ADMISSION_CAP`] intentions are admitted; the rest are
/// dropped for this cycle. There are no retries within a cycle.
#[derive(Clone)]
pub struct IntentionExecutor {
    sinks: ActionSinks,
    scrubber: SecretScrubber,
}

impl IntentionExecutor {
    pub fn new(sinks: ActionSinks) -> Self {
        Self {
            sinks,
            scrubber: SecretScrubber::new(),
        }
    }

    /// Execute the admitted prefix of `intentions`, in order.
    ///
    /// A failure or panic in one intention is recorded in its outcome and
    /// does not stop the remaining admitted intentions.
    pub async fn execute(&self, intentions: &[Intention]) -> Vec<ExecutionOutcome> {
        let admitted = intentions.len().min(ADMISSION_CAP);
        if intentions.len() > admitted {
            tracing::info!(
                planned = intentions.len(),
                admitted,
                dropped = intentions.len() - admitted,
                "admission cap reached, dropping lower-priority intentions"
            );
        }

        let mut outcomes = Vec::with_capacity(admitted);
        for intention in &intentions[..admitted] {
            let outcome = match AssertUnwindSafe(self.dispatch(intention))
                .catch_unwind()
                .await
            {
                Ok(Ok(detail)) => {
                    tracing::info!(intention = %intention, detail = ?detail, "intention executed");
                    ExecutionOutcome::succeeded(intention.clone(), detail)
                }
                Ok(Err(e)) => {
                    let message = self.scrubber.scrub_message(&e.to_string());
                    tracing::error!(intention = %intention, error = %message, "intention failed");
                    ExecutionOutcome::failed(intention.clone(), message)
                }
                Err(panic) => {
                    let message = DomainError::Panicked(panic_message(panic.as_ref())).to_string();
                    tracing::error!(intention = %intention, error = %message, "intention panicked");
                    ExecutionOutcome::failed(intention.clone(), message)
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn dispatch(&self, intention: &Intention) -> DomainResult<Option<String>> {
        match &intention.action {
            Action::TriggerWorkflow {
                workflow,
                parameters,
            } => {
                self.sinks.workflows.dispatch(workflow, parameters).await?;
                Ok(None)
            }
            Action::LocalOptimization { tasks } => self.run_maintenance(tasks).await,
            Action::DeployAgents { platform, count } => {
                if platform != self.sinks.deployments.platform() {
                    return Err(DomainError::ActionFailed(format!(
                        "no deployment sink for platform '{platform}'"
                    )));
                }
                tracing::info!(platform = %platform, count, "creating agent deployment");
                let id = self.sinks.deployments.create_deployment().await?;
                Ok(Some(id))
            }
        }
    }

    /// Run every named task, skipping unknown names. Fails if any known task
    /// failed, after all of them have been attempted.
    async fn run_maintenance(&self, tasks: &[String]) -> DomainResult<Option<String>> {
        let mut summaries = Vec::new();
        let mut failures = Vec::new();

        for name in tasks {
            let Some(task) = MaintenanceTask::from_name(name) else {
                tracing::debug!(task = %name, "unknown maintenance task, skipping");
                continue;
            };
            match self.sinks.maintenance.run(task).await {
                Ok(summary) => summaries.push(summary),
                Err(e) => failures.push(format!("{}: {e}", task.as_str())),
            }
        }

        if failures.is_empty() {
            Ok((!summaries.is_empty()).then(|| summaries.join("; ")))
        } else {
            Err(DomainError::ActionFailed(failures.join("; ")))
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
