//! Read-only dashboard HTTP server.
//!
//! Serves the latest published [`AgentState`]; it never triggers a cycle.
//!
//! Routes:
//! - `GET /` renders beliefs, desires and intentions as an HTML page
//! - `GET /api/status` returns a JSON status summary
//! - `GET /health` liveness check

use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::domain::models::{AgentState, BeliefSnapshot, DashboardConfig, LoopStatus, Service};

/// Seconds between automatic page reloads.
const REFRESH_SECS: u32 = 30;

struct AppState {
    agent_name: String,
    state: watch::Receiver<AgentState>,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: LoopStatus,
    pub agent: String,
    pub cycle: u64,
    pub beliefs: Option<BeliefSnapshot>,
    pub desires: usize,
    pub intentions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

pub struct DashboardServer {
    config: DashboardConfig,
    agent_name: String,
    state: watch::Receiver<AgentState>,
}

impl DashboardServer {
    pub fn new(
        config: DashboardConfig,
        agent_name: impl Into<String>,
        state: watch::Receiver<AgentState>,
    ) -> Self {
        Self {
            config,
            agent_name: agent_name.into(),
            state,
        }
    }

    /// Build the router.
    pub fn router(self) -> Router {
        let state = Arc::new(AppState {
            agent_name: self.agent_name,
            state: self.state,
        });

        Router::new()
            .route("/", get(index))
            .route("/api/status", get(status))
            .route("/health", get(health_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "dashboard listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("dashboard stopped");
        Ok(())
    }
}

async fn health_check() -> &'static str {
    "OK"
}

async fn status(State(app): State<Arc<AppState>>) -> Json<StatusResponse> {
    let state = app.state.borrow().clone();
    Json(StatusResponse {
        status: state.status,
        agent: app.agent_name.clone(),
        cycle: state.cycle,
        beliefs: state.beliefs,
        desires: state.desires.len(),
        intentions: state.intentions.len(),
        last_error: state.last_error,
    })
}

async fn index(State(app): State<Arc<AppState>>) -> Html<String> {
    let state = app.state.borrow().clone();
    Html(render_page(&app.agent_name, &state))
}

fn render_page(agent_name: &str, state: &AgentState) -> String {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <meta http-equiv=\"refresh\" content=\"{REFRESH_SECS}\">\
         <title>{name}</title></head><body>\
         <h1>{name}</h1><p>Status: <strong>{status}</strong> &middot; cycle {cycle}</p>",
        name = escape_html(agent_name),
        status = state.status.as_str(),
        cycle = state.cycle,
    );

    if let Some(error) = &state.last_error {
        let _ = write!(page, "<p>Last error: {}</p>", escape_html(error));
    }

    page.push_str("<h2>Beliefs</h2>");
    match &state.beliefs {
        Some(beliefs) => {
            let _ = write!(
                page,
                "<ul><li>System health: {}</li><li>Resource usage: {:.1}%</li>\
                 <li>Active agents: {}</li><li>Revenue: {:.2} / {:.2}</li>\
                 <li>Updated: {}</li></ul><h3>Services</h3><ul>",
                beliefs.system_health,
                beliefs.resource_usage,
                beliefs.active_agent_count,
                beliefs.revenue_metrics.current_month,
                beliefs.revenue_metrics.target,
                beliefs.last_updated.to_rfc3339(),
            );
            for service in Service::ALL {
                let health = if beliefs.cloud_status.get(service) {
                    "healthy"
                } else {
                    "unhealthy"
                };
                let _ = write!(page, "<li>{service}: {health}</li>");
            }
            page.push_str("</ul>");
        }
        None => page.push_str("<p>No snapshot yet.</p>"),
    }

    page.push_str("<h2>Desires</h2><ol>");
    for desire in &state.desires {
        let _ = write!(
            page,
            "<li>{} (priority {})</li>",
            desire.kind(),
            desire.priority
        );
    }
    page.push_str("</ol><h2>Intentions</h2><ol>");
    for intention in &state.intentions {
        let _ = write!(page, "<li>{}</li>", escape_html(&intention.to_string()));
    }
    page.push_str("</ol><h2>Last outcomes</h2><ul>");
    for outcome in &state.last_outcomes {
        let result = match (&outcome.error, outcome.success) {
            (_, true) => "ok".to_string(),
            (Some(error), false) => format!("failed: {error}"),
            (None, false) => "failed".to_string(),
        };
        let _ = write!(
            page,
            "<li>{}: {}</li>",
            escape_html(outcome.intention.action.name()),
            escape_html(&result)
        );
    }
    page.push_str("</ul></body></html>");
    page
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
