//! Vercel REST API request and response models.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v13/deployments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentRequest {
    pub name: String,
    pub project_id: String,
    /// Always `production` for agent deployments.
    pub target: String,
    pub git_source: GitSource,
}

/// Git revision a deployment is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: String,
    pub owner: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
}

/// Fields of a created deployment the agent reads.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentCreated {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `GET /v6/deployments`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentList {
    #[serde(default)]
    pub deployments: Vec<DeploymentSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentSummary {
    pub uid: String,
    #[serde(default)]
    pub state: Option<String>,
}
