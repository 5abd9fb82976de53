//! Dashboard routes, exercised in-process with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::watch;
use tower::ServiceExt;

use bdi_agent::adapters::DashboardServer;
use bdi_agent::domain::models::{AgentState, DashboardConfig, LoopStatus};
use bdi_agent::services::{ControlLoop, LoopConfig};
use common::{pipeline, World};

async fn get(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn router(state: watch::Receiver<AgentState>) -> axum::Router {
    DashboardServer::new(DashboardConfig::default(), "FMAA-BDI-Master", state).router()
}

#[tokio::test]
async fn test_health() {
    let (_tx, rx) = watch::channel(AgentState::default());
    let (status, body) = get(router(rx), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_status_before_first_cycle() {
    let (_tx, rx) = watch::channel(AgentState::default());
    let (status, body) = get(router(rx), "/api/status").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "stopped");
    assert!(json["beliefs"].is_null());
    assert_eq!(json["desires"], 0);
    assert_eq!(json["intentions"], 0);
}

#[tokio::test]
async fn test_status_reflects_latest_cycle() {
    let mut world = World::healthy();
    world.agents = Some(1);
    world.services.huggingface = false;
    let (pipeline, _sinks) = pipeline(&world);
    let control = ControlLoop::new(pipeline, LoopConfig::default());
    control.run_cycle(1).await.unwrap();

    let (_, body) = get(router(control.subscribe()), "/api/status").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["cycle"], 1);
    assert_eq!(json["desires"], 2);
    assert_eq!(json["intentions"], 2);
    assert_eq!(json["beliefs"]["system_health"], 75);
    assert_eq!(json["beliefs"]["cloud_status"]["huggingface"], false);
    assert_eq!(json["beliefs"]["active_agent_count"], 1);
}

#[tokio::test]
async fn test_index_renders_running_state() {
    let (tx, rx) = watch::channel(AgentState::default());
    tx.send_modify(|s| s.status = LoopStatus::Running);

    let (status, body) = get(router(rx), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("FMAA-BDI-Master"));
    assert!(body.contains("running"));
}

#[tokio::test]
async fn test_unknown_route() {
    let (_tx, rx) = watch::channel(AgentState::default());
    let (status, _) = get(router(rx), "/api/cycle").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
