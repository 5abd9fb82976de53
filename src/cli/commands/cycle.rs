//! `cycle`: run one cycle and report it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use super::{init_logging, load_config};
use crate::application::AgentRuntime;
use crate::cli::output::{list_table, output, render_section, truncate, CommandOutput};
use crate::domain::models::{
    BeliefSnapshot, Desire, ExecutionOutcome, Intention, Service,
};
use crate::services::CycleReport;

#[derive(Debug, Serialize)]
pub struct CycleOutput {
    pub cycle: u64,
    pub beliefs: BeliefSnapshot,
    pub desires: Vec<Desire>,
    pub intentions: Vec<Intention>,
    pub outcomes: Vec<ExecutionOutcome>,
}

impl From<CycleReport> for CycleOutput {
    fn from(report: CycleReport) -> Self {
        Self {
            cycle: report.cycle,
            beliefs: report.beliefs,
            desires: report.desires,
            intentions: report.intentions,
            outcomes: report.outcomes,
        }
    }
}

impl CommandOutput for CycleOutput {
    fn to_human(&self) -> String {
        let beliefs = &self.beliefs;
        let mut lines = vec![
            format!("Cycle {} at {}", self.cycle, beliefs.last_updated.to_rfc3339()),
            format!(
                "System health {} | CPU {:.1}% | Active agents {} | Revenue {:.2} / {:.2}",
                beliefs.system_health,
                beliefs.resource_usage,
                beliefs.active_agent_count,
                beliefs.revenue_metrics.current_month,
                beliefs.revenue_metrics.target,
            ),
        ];

        let services: Vec<String> = Service::ALL
            .iter()
            .map(|s| {
                let mark = if beliefs.cloud_status.get(*s) { "up" } else { "down" };
                format!("{s}={mark}")
            })
            .collect();
        lines.push(format!("Services {}", services.join(" ")));

        let mut desires = list_table(&["priority", "desire"]);
        for desire in &self.desires {
            desires.add_row(vec![desire.priority.to_string(), desire.kind().to_string()]);
        }
        lines.push(render_section("Desires", &desires, self.desires.len()));

        let mut intentions = list_table(&["priority", "action"]);
        for intention in &self.intentions {
            intentions.add_row(vec![
                intention.priority.to_string(),
                intention.action.name().to_string(),
            ]);
        }
        lines.push(render_section("Intentions", &intentions, self.intentions.len()));

        let mut outcomes = list_table(&["action", "result", "detail"]);
        for outcome in &self.outcomes {
            let (result, detail) = if outcome.success {
                ("ok", outcome.detail.clone().unwrap_or_default())
            } else {
                ("failed", outcome.error.clone().unwrap_or_default())
            };
            outcomes.add_row(vec![
                outcome.intention.action.name().to_string(),
                result.to_string(),
                truncate(&detail, 60),
            ]);
        }
        lines.push(render_section("Executed", &outcomes, self.outcomes.len()));

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(config_path: Option<PathBuf>, json_mode: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let _logger = init_logging(&config, json_mode)?;

    let runtime = AgentRuntime::from_config(config).context("failed to build agent")?;
    let report = runtime.run_once().await.context("cycle failed")?;
    output(&CycleOutput::from(report), json_mode);
    Ok(())
}
