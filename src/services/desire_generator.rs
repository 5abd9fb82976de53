//! Desire generation: fixed threshold rules over a belief snapshot.

use crate::domain::models::desire::{REVENUE_PRIORITY, SCALING_PRIORITY, SYSTEM_PRIORITY};
use crate::domain::models::{BeliefSnapshot, Desire, DesireRulesConfig, Goal, Remediation};

/// Share of the revenue target below which revenue optimization is wanted.
pub const REVENUE_ATTAINMENT_THRESHOLD: f64 = 0.8;
/// System health below which system optimization is wanted.
pub const HEALTH_THRESHOLD: u8 = 90;
/// Health level a system optimization goal aims for.
pub const TARGET_HEALTH: u8 = 95;
/// Active agent count below which scaling is wanted.
pub const MIN_ACTIVE_AGENTS: u32 = 5;
/// Agent count a scaling goal aims for.
pub const TARGET_AGENTS: u32 = 10;

/// Derives goals from beliefs.
///
/// Each enabled rule is evaluated independently; every triggered rule
/// contributes one desire. Output is in rule order, not priority order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesireGenerator {
    rules: DesireRulesConfig,
}

impl DesireGenerator {
    pub fn new(rules: DesireRulesConfig) -> Self {
        Self { rules }
    }

    /// Derive this cycle's desires. Pure and total.
    pub fn generate(&self, beliefs: &BeliefSnapshot) -> Vec<Desire> {
        let mut desires = Vec::new();

        let revenue = &beliefs.revenue_metrics;
        if self.rules.revenue_optimization
            && revenue.current_month < REVENUE_ATTAINMENT_THRESHOLD * revenue.target
        {
            desires.push(Desire {
                priority: REVENUE_PRIORITY,
                goal: Goal::RevenueOptimization {
                    target_increase: revenue.target - revenue.current_month,
                    strategy: "aggressive_scaling".to_string(),
                },
            });
        }

        if self.rules.system_optimization && beliefs.system_health < HEALTH_THRESHOLD {
            desires.push(Desire {
                priority: SYSTEM_PRIORITY,
                goal: Goal::SystemOptimization {
                    target_health: TARGET_HEALTH,
                    actions: vec![Remediation::Cleanup, Remediation::ResourceOptimization],
                },
            });
        }

        if self.rules.agent_scaling && beliefs.active_agent_count < MIN_ACTIVE_AGENTS {
            desires.push(Desire {
                priority: SCALING_PRIORITY,
                goal: Goal::AgentScaling {
                    target_agents: TARGET_AGENTS,
                    deployment_strategy: "gradual".to_string(),
                },
            });
        }

        tracing::debug!(count = desires.len(), "generated desires");
        desires
    }
}
