//! GitHub HTTP client for workflow dispatch.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use std::time::Duration;

use super::models::WorkflowDispatchRequest;
use crate::adapters::http::{build_client, join_url, unexpected_status};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GithubConfig, Secret};
use crate::domain::ports::WorkflowDispatcher;

/// Upper bound on one dispatch request.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Dispatches workflows in one configured repository.
///
/// GitHub answers an accepted dispatch with `204 No Content`; any other
/// status is reported as [`DomainError::UnexpectedStatus`].
#[derive(Debug, Clone)]
pub struct GitHubWorkflowClient {
    http: Client,
    api_base: String,
    owner: String,
    repo: String,
    git_ref: String,
    token: Secret,
}

impl GitHubWorkflowClient {
    pub fn new(config: &GithubConfig) -> DomainResult<Self> {
        Ok(Self {
            http: build_client(DISPATCH_TIMEOUT)?,
            api_base: config.api_base.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            git_ref: config.git_ref.clone(),
            token: config.token.clone(),
        })
    }

    fn dispatch_url(&self, workflow: &str) -> String {
        join_url(
            &self.api_base,
            &format!(
                "repos/{}/{}/actions/workflows/{}/dispatches",
                self.owner, self.repo, workflow
            ),
        )
    }
}

#[async_trait]
impl WorkflowDispatcher for GitHubWorkflowClient {
    async fn dispatch(
        &self,
        workflow: &str,
        inputs: &BTreeMap<String, String>,
    ) -> DomainResult<()> {
        let body = WorkflowDispatchRequest {
            git_ref: self.git_ref.clone(),
            inputs: inputs.clone(),
        };

        let resp = self
            .http
            .post(self.dispatch_url(workflow))
            .header("Authorization", format!("Bearer {}", self.token.expose()))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("GitHub workflow dispatch failed: {e}")))?;

        if resp.status() != StatusCode::NO_CONTENT {
            return Err(unexpected_status(resp).await);
        }

        tracing::info!(
            workflow,
            repo = %format!("{}/{}", self.owner, self.repo),
            git_ref = %self.git_ref,
            "workflow dispatched"
        );
        Ok(())
    }
}
