//! Published agent state, read by the dashboard and CLI.

use serde::{Deserialize, Serialize};

use super::belief::BeliefSnapshot;
use super::desire::Desire;
use super::intention::{ExecutionOutcome, Intention};

/// Whether the control loop is currently active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    Running,
    #[default]
    Stopped,
}

impl LoopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopStatus::Running => "running",
            LoopStatus::Stopped => "stopped",
        }
    }
}

/// Latest results of each pipeline stage.
///
/// Each field is replaced as a whole when its stage completes, so readers
/// never observe a half-built collection. Before the first cycle completes
/// `beliefs` is `None` and the collections are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub status: LoopStatus,
    /// Number of the most recent cycle started, 1-based.
    pub cycle: u64,
    pub beliefs: Option<BeliefSnapshot>,
    pub desires: Vec<Desire>,
    pub intentions: Vec<Intention>,
    pub last_outcomes: Vec<ExecutionOutcome>,
    /// Error that aborted the most recent cycle, cleared on the next success.
    pub last_error: Option<String>,
}
