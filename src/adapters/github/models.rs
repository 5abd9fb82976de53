//! GitHub REST API request models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for `POST /repos/{owner}/{repo}/actions/workflows/{workflow}/dispatches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDispatchRequest {
    /// Branch or tag the workflow runs on.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Workflow inputs; GitHub only accepts string values.
    pub inputs: BTreeMap<String, String>,
}
