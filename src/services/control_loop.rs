//! Control loop - drives the belief/desire/intention cycle.
//!
//! Each cycle runs the stages strictly in sequence:
//! beliefs -> desires -> intentions -> execution. After each stage its result
//! is published on a watch channel so readers (dashboard, CLI) always see a
//! complete value, never a partially updated one.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AgentConfig, AgentState, BeliefSnapshot, Desire, ExecutionOutcome, Intention, LoopStatus,
};
use crate::services::{BeliefStore, DesireGenerator, IntentionExecutor, IntentionPlanner};

/// Timing of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Delay after a completed cycle.
    pub interval: Duration,
    /// Delay after a cycle that failed unexpectedly.
    pub backoff: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            backoff: Duration::from_secs(10),
        }
    }
}

impl From<&AgentConfig> for LoopConfig {
    fn from(config: &AgentConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.cycle_interval_secs),
            backoff: Duration::from_secs(config.error_backoff_secs),
        }
    }
}

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u64,
    pub beliefs: BeliefSnapshot,
    pub desires: Vec<Desire>,
    pub intentions: Vec<Intention>,
    pub outcomes: Vec<ExecutionOutcome>,
}

impl CycleReport {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }
}

/// The four reasoning stages, wired together.
pub struct Pipeline {
    beliefs: BeliefStore,
    desires: DesireGenerator,
    planner: IntentionPlanner,
    executor: IntentionExecutor,
}

impl Pipeline {
    pub fn new(
        beliefs: BeliefStore,
        desires: DesireGenerator,
        planner: IntentionPlanner,
        executor: IntentionExecutor,
    ) -> Self {
        Self {
            beliefs,
            desires,
            planner,
            executor,
        }
    }

    /// Run one full cycle, publishing each stage's result as it completes.
    ///
    /// Fails only if the assembled snapshot violates its invariants; probe,
    /// metrics and action failures are absorbed by the stages themselves.
    pub async fn run_cycle(
        &self,
        cycle: u64,
        state: &watch::Sender<AgentState>,
    ) -> DomainResult<CycleReport> {
        let beliefs = self.beliefs.refresh().await;
        beliefs.validate()?;
        state.send_modify(|s| s.beliefs = Some(beliefs.clone()));

        let desires = self.desires.generate(&beliefs);
        state.send_modify(|s| s.desires = desires.clone());

        let intentions = self.planner.plan(&desires);
        state.send_modify(|s| s.intentions = intentions.clone());

        let outcomes = self.executor.execute(&intentions).await;
        state.send_modify(|s| {
            s.last_outcomes = outcomes.clone();
            s.last_error = None;
        });

        Ok(CycleReport {
            cycle,
            beliefs,
            desires,
            intentions,
            outcomes,
        })
    }
}

/// Runs the pipeline periodically until told to stop.
///
/// The loop is the single writer of [`AgentState`]; call
/// [`subscribe`](ControlLoop::subscribe) for a read handle.
pub struct ControlLoop {
    pipeline: Arc<Pipeline>,
    config: LoopConfig,
    state: Arc<watch::Sender<AgentState>>,
}

impl ControlLoop {
    pub fn new(pipeline: Pipeline, config: LoopConfig) -> Self {
        let (state, _) = watch::channel(AgentState::default());
        Self {
            pipeline: Arc::new(pipeline),
            config,
            state: Arc::new(state),
        }
    }

    /// A read handle on the published state.
    pub fn subscribe(&self) -> watch::Receiver<AgentState> {
        self.state.subscribe()
    }

    /// Run a single numbered cycle in its own task.
    ///
    /// A panic anywhere in the cycle is returned as
    /// [`DomainError::Panicked`] instead of unwinding into the caller.
    pub async fn run_cycle(&self, cycle: u64) -> DomainResult<CycleReport> {
        self.state.send_modify(|s| s.cycle = cycle);

        let pipeline = Arc::clone(&self.pipeline);
        let state = Arc::clone(&self.state);
        let span = tracing::info_span!("cycle", cycle);
        let handle = tokio::spawn(
            async move { pipeline.run_cycle(cycle, &state).await }.instrument(span),
        );

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(DomainError::Panicked(format!("cycle {cycle}: {e}"))),
            Err(e) => Err(DomainError::ActionFailed(format!("cycle {cycle} aborted: {e}"))),
        }
    }

    /// Run cycles until `stop` becomes `true` (or its sender is dropped).
    ///
    /// The stop request is only observed between cycles; an in-flight cycle
    /// always runs to completion. Returns the number of cycles run.
    pub async fn run(&self, mut stop: watch::Receiver<bool>) -> u64 {
        self.state.send_modify(|s| s.status = LoopStatus::Running);
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            backoff_secs = self.config.backoff.as_secs(),
            "control loop started"
        );

        let mut cycle = 0;
        while !*stop.borrow_and_update() {
            cycle += 1;
            let delay = match self.run_cycle(cycle).await {
                Ok(report) => {
                    tracing::info!(
                        cycle,
                        desires = report.desires.len(),
                        intentions = report.intentions.len(),
                        executed = report.outcomes.len(),
                        failed = report.failed_count(),
                        "cycle completed"
                    );
                    self.config.interval
                }
                Err(e) => {
                    tracing::error!(cycle, error = %e, "cycle failed, backing off");
                    let message = e.to_string();
                    self.state.send_modify(|s| s.last_error = Some(message));
                    self.config.backoff
                }
            };

            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                changed = stop.changed() => {
                    if changed.is_err() {
                        tracing::debug!("stop signal sender dropped");
                        break;
                    }
                }
            }
        }

        self.state.send_modify(|s| s.status = LoopStatus::Stopped);
        tracing::info!(cycles = cycle, "control loop stopped");
        cycle
    }
}
