//! End-to-end cycle tests over in-memory ports.

mod common;

use bdi_agent::domain::models::{
    Action, AgentState, DesireKind, Goal, MaintenanceTask, RevenueRecord,
};
use bdi_agent::services::{DesireGenerator, IntentionPlanner};
use common::{pipeline, snapshot, Sinks, World};
use tokio::sync::watch;

#[tokio::test]
async fn test_healthy_world_does_nothing() {
    let (pipeline, sinks) = pipeline(&World::healthy());
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    assert_eq!(report.beliefs.system_health, 100);
    assert!(report.desires.is_empty());
    assert!(report.intentions.is_empty());
    assert!(report.outcomes.is_empty());
    assert!(sinks.workflows.calls().is_empty());
    assert_eq!(sinks.deployments.calls(), 0);
}

#[tokio::test]
async fn test_revenue_shortfall_dispatches_workflow() {
    let mut world = World::healthy();
    world.revenue = Some(RevenueRecord {
        current_month: 12_500.0,
        target: 50_000.0,
        growth_rate: 0.0,
        active_streams: 0,
    });
    let (pipeline, sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    assert_eq!(report.desires.len(), 1);
    match &report.desires[0].goal {
        Goal::RevenueOptimization {
            target_increase, ..
        } => assert!((target_increase - 37_500.0).abs() < f64::EPSILON),
        other => panic!("expected revenue optimization, got {other:?}"),
    }

    assert_eq!(report.intentions.len(), 1);
    assert_eq!(report.intentions[0].priority, 10);

    let calls = sinks.workflows.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "revenue-optimization.yml");
    assert_eq!(calls[0].1["target_increase"], "37500");
    assert_eq!(calls[0].1["strategy"], "aggressive_scaling");
    assert!(report.outcomes[0].success);
}

#[tokio::test]
async fn test_few_agents_deploys_once() {
    let mut world = World::healthy();
    world.agents = Some(2);
    let (pipeline, sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    assert_eq!(report.intentions.len(), 1);
    assert!(matches!(
        report.intentions[0].action,
        Action::DeployAgents { count: 10, .. }
    ));
    assert_eq!(sinks.deployments.calls(), 1);
    assert_eq!(report.outcomes[0].detail.as_deref(), Some("dpl_1"));
}

#[tokio::test]
async fn test_metrics_failure_uses_placeholder_and_completes() {
    let mut world = World::healthy();
    world.revenue = None;
    let (pipeline, sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    assert_eq!(report.beliefs.revenue_metrics, RevenueRecord::placeholder());
    // 100 of 50000 is far below target
    assert_eq!(report.desires[0].kind(), DesireKind::RevenueOptimization);
    assert_eq!(sinks.workflows.calls().len(), 1);
}

#[tokio::test]
async fn test_non_positive_target_is_replaced() {
    let mut world = World::healthy();
    world.revenue = Some(RevenueRecord {
        current_month: 10.0,
        target: 0.0,
        growth_rate: 0.0,
        active_streams: 0,
    });
    let (pipeline, _sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();
    assert_eq!(report.beliefs.revenue_metrics, RevenueRecord::placeholder());
}

#[tokio::test]
async fn test_nan_cpu_sample_still_completes_cycle() {
    let mut world = World::healthy();
    world.cpu = Some(f32::NAN);
    let (pipeline, _sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();
    assert!(report.beliefs.resource_usage.is_finite());
    assert!(state.borrow().last_error.is_none());
}

#[tokio::test]
async fn test_unhealthy_services_trigger_local_maintenance() {
    let mut world = World::healthy();
    world.services.supabase_db = false;
    world.services.huggingface = false;
    let (pipeline, sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    assert_eq!(report.beliefs.system_health, 50);
    assert_eq!(report.desires[0].kind(), DesireKind::SystemOptimization);
    assert_eq!(
        sinks.maintenance.calls(),
        vec![MaintenanceTask::CleanupLogs, MaintenanceTask::OptimizeProcesses]
    );
}

#[tokio::test]
async fn test_every_rule_fires_and_all_execute_in_priority_order() {
    let world = World {
        services: Default::default(),
        cpu: None,
        agents: None,
        revenue: None,
    };
    let (pipeline, sinks) = pipeline(&world);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    let priorities: Vec<i32> = report.intentions.iter().map(|i| i.priority).collect();
    assert_eq!(priorities, vec![10, 8, 6]);
    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes.iter().all(|o| o.success));
    assert_eq!(report.beliefs.resource_usage, 5.0);
    assert_eq!(report.beliefs.active_agent_count, 0);
    assert_eq!(sinks.deployments.calls(), 1);
}

#[tokio::test]
async fn test_failed_dispatch_does_not_block_later_intentions() {
    let world = World {
        services: Default::default(),
        cpu: Some(50.0),
        agents: Some(0),
        revenue: None,
    };
    let sinks = Sinks {
        workflows: std::sync::Arc::new(common::RecordingDispatcher::failing()),
        ..Default::default()
    };
    let pipeline = common::pipeline_with(&world, &sinks);
    let (state, _rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(1, &state).await.unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert!(!report.outcomes[0].success);
    assert!(report.outcomes[0]
        .error
        .as_deref()
        .unwrap()
        .contains("422"));
    assert!(report.outcomes[1].success);
    assert!(report.outcomes[2].success);
    assert_eq!(sinks.deployments.calls(), 1);
}

#[tokio::test]
async fn test_cycle_publishes_each_stage() {
    let mut world = World::healthy();
    world.agents = Some(1);
    let (pipeline, _sinks) = pipeline(&world);
    let (state, rx) = watch::channel(AgentState::default());

    let report = pipeline.run_cycle(7, &state).await.unwrap();

    let published = rx.borrow().clone();
    assert_eq!(published.beliefs.as_ref(), Some(&report.beliefs));
    assert_eq!(published.desires, report.desires);
    assert_eq!(published.intentions, report.intentions);
    assert_eq!(published.last_outcomes, report.outcomes);
    assert!(published.last_error.is_none());
}

#[test]
fn test_planner_output_is_deterministic() {
    let beliefs = snapshot(100.0, 50_000.0, 0, 0);
    let generator = DesireGenerator::default();
    let planner = IntentionPlanner::default();

    let first = planner.plan(&generator.generate(&beliefs));
    let second = planner.plan(&generator.generate(&beliefs));

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}
