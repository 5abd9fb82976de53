mod common;

use bdi_agent::domain::models::{
    Action, Desire, DesireKind, Goal, Intention, Remediation,
};
use bdi_agent::services::{DesireGenerator, IntentionPlanner, ADMISSION_CAP};
use common::{executor, snapshot, Sinks};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arb_desire() -> impl Strategy<Value = Desire> {
    (any::<i8>(), 0u8..3).prop_map(|(priority, kind)| {
        let goal = match kind {
            0 => Goal::RevenueOptimization {
                target_increase: 1_000.0,
                strategy: "aggressive_scaling".to_string(),
            },
            1 => Goal::SystemOptimization {
                target_health: 95,
                actions: vec![Remediation::Cleanup],
            },
            _ => Goal::AgentScaling {
                target_agents: 10,
                deployment_strategy: "gradual".to_string(),
            },
        };
        Desire {
            priority: i32::from(priority),
            goal,
        }
    })
}

fn arb_intention() -> impl Strategy<Value = Intention> {
    any::<i8>().prop_map(|priority| Intention {
        priority: i32::from(priority),
        action: Action::TriggerWorkflow {
            workflow: "revenue-optimization.yml".to_string(),
            parameters: BTreeMap::new(),
        },
    })
}

proptest! {
    /// Property: revenue optimization is wanted exactly when revenue is below
    /// 80% of target, and asks for the full shortfall
    #[test]
    fn prop_revenue_rule(
        target in 1.0f64..1_000_000.0,
        share in 0.0f64..2.0,
    ) {
        let current = target * share;
        let desires = DesireGenerator::default().generate(&snapshot(current, target, 10, 100));
        let revenue: Vec<&Desire> = desires
            .iter()
            .filter(|d| d.kind() == DesireKind::RevenueOptimization)
            .collect();

        if current < 0.8 * target {
            prop_assert_eq!(revenue.len(), 1);
            match &revenue[0].goal {
                Goal::RevenueOptimization { target_increase, .. } => {
                    prop_assert!((target_increase - (target - current)).abs() < 1e-6);
                }
                other => prop_assert!(false, "unexpected goal {:?}", other),
            }
        } else {
            prop_assert!(revenue.is_empty());
        }
    }

    /// Property: scaling is wanted exactly when fewer than 5 agents are active
    #[test]
    fn prop_scaling_rule(agents in 0u32..50) {
        let desires = DesireGenerator::default().generate(&snapshot(50_000.0, 50_000.0, agents, 100));
        let scaling: Vec<&Desire> = desires
            .iter()
            .filter(|d| d.kind() == DesireKind::AgentScaling)
            .collect();

        if agents < 5 {
            prop_assert_eq!(scaling.len(), 1);
            let is_ten = matches!(scaling[0].goal, Goal::AgentScaling { target_agents: 10, .. });
            prop_assert!(is_ten);
        } else {
            prop_assert!(scaling.is_empty());
        }
    }

    /// Property: the plan is sorted by non-increasing priority, and equal
    /// priorities keep desire order
    #[test]
    fn prop_plan_sorted_and_stable(desires in prop::collection::vec(arb_desire(), 0..12)) {
        let intentions = IntentionPlanner::default().plan(&desires);
        prop_assert_eq!(intentions.len(), desires.len());

        for pair in intentions.windows(2) {
            prop_assert!(pair[0].priority >= pair[1].priority);
        }

        // Stable sort reference: order of (priority desc, original index asc)
        let mut expected: Vec<(usize, &Desire)> = desires.iter().enumerate().collect();
        expected.sort_by(|a, b| b.1.priority.cmp(&a.1.priority).then(a.0.cmp(&b.0)));
        let expected_names: Vec<&str> = expected
            .iter()
            .map(|(_, d)| match d.kind() {
                DesireKind::RevenueOptimization => "trigger_workflow",
                DesireKind::SystemOptimization => "local_optimization",
                DesireKind::AgentScaling => "deploy_agents",
            })
            .collect();
        let actual_names: Vec<&str> = intentions.iter().map(|i| i.action.name()).collect();
        prop_assert_eq!(actual_names, expected_names);
    }

    /// Property: planning is deterministic
    #[test]
    fn prop_plan_deterministic(desires in prop::collection::vec(arb_desire(), 0..8)) {
        let planner = IntentionPlanner::default();
        prop_assert_eq!(planner.plan(&desires), planner.plan(&desires));
    }

    /// Property: the executor never runs more than the admission cap
    #[test]
    fn prop_admission_cap(intentions in prop::collection::vec(arb_intention(), 0..10)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let sinks = Sinks::default();
        let executor = executor(&sinks);

        let outcomes = runtime.block_on(executor.execute(&intentions));

        prop_assert_eq!(outcomes.len(), intentions.len().min(ADMISSION_CAP));
        prop_assert_eq!(sinks.workflows.calls().len(), outcomes.len());
    }
}
