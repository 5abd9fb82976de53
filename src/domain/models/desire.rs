//! Desire models: prioritized goals derived from a belief snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority assigned to revenue optimization goals.
pub const REVENUE_PRIORITY: i32 = 10;
/// Priority assigned to system optimization goals.
pub const SYSTEM_PRIORITY: i32 = 8;
/// Priority assigned to agent scaling goals.
pub const SCALING_PRIORITY: i32 = 6;

/// Remediation steps a system optimization goal asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remediation {
    Cleanup,
    ResourceOptimization,
}

/// Goal-specific payload of a desire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Goal {
    RevenueOptimization {
        target_increase: f64,
        strategy: String,
    },
    SystemOptimization {
        target_health: u8,
        actions: Vec<Remediation>,
    },
    AgentScaling {
        target_agents: u32,
        deployment_strategy: String,
    },
}

/// Kind of goal, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesireKind {
    RevenueOptimization,
    SystemOptimization,
    AgentScaling,
}

impl fmt::Display for DesireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DesireKind::RevenueOptimization => "revenue_optimization",
            DesireKind::SystemOptimization => "system_optimization",
            DesireKind::AgentScaling => "agent_scaling",
        };
        f.write_str(name)
    }
}

/// A goal with its urgency. Higher priority is more urgent.
///
/// Recomputed from scratch every cycle; never carried over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desire {
    pub priority: i32,
    #[serde(flatten)]
    pub goal: Goal,
}

impl Desire {
    pub fn kind(&self) -> DesireKind {
        match self.goal {
            Goal::RevenueOptimization { .. } => DesireKind::RevenueOptimization,
            Goal::SystemOptimization { .. } => DesireKind::SystemOptimization,
            Goal::AgentScaling { .. } => DesireKind::AgentScaling,
        }
    }
}
