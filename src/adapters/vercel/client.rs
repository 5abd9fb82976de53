//! Vercel HTTP client.
//!
//! Creates production deployments of the agent from the configured GitHub
//! repository, and counts the project's READY deployments as the number of
//! active agents.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

use super::models::{CreateDeploymentRequest, DeploymentCreated, DeploymentList, GitSource};
use crate::adapters::http::{build_client, join_url, unexpected_status};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GithubConfig, Secret, VercelConfig};
use crate::domain::ports::{AgentCensus, DeploymentCreator};

/// Platform name intentions use to target this adapter.
pub const PLATFORM: &str = "vercel";

/// Upper bound on one deployment request.
pub const DEPLOY_TIMEOUT: Duration = Duration::from_secs(20);

/// Most deployments counted by one census request.
const CENSUS_PAGE_LIMIT: u32 = 100;

const ACCEPTED: [StatusCode; 3] = [StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED];

#[derive(Debug, Clone)]
pub struct VercelClient {
    http: Client,
    api_base: String,
    project_id: String,
    deployment_name: String,
    token: Secret,
    git_source: GitSource,
}

impl VercelClient {
    /// Deployments are built from the repository the workflows live in.
    pub fn new(vercel: &VercelConfig, github: &GithubConfig) -> DomainResult<Self> {
        Ok(Self {
            http: build_client(DEPLOY_TIMEOUT)?,
            api_base: vercel.api_base.clone(),
            project_id: vercel.project_id.clone(),
            deployment_name: vercel.deployment_name.clone(),
            token: vercel.token.clone(),
            git_source: GitSource {
                kind: "github".to_string(),
                repo: github.repo.clone(),
                owner: github.owner.clone(),
                git_ref: github.git_ref.clone(),
            },
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.token.expose()))
    }

    fn deployment_request(&self) -> CreateDeploymentRequest {
        CreateDeploymentRequest {
            name: self.deployment_name.clone(),
            project_id: self.project_id.clone(),
            target: "production".to_string(),
            git_source: self.git_source.clone(),
        }
    }
}

#[async_trait]
impl DeploymentCreator for VercelClient {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn create_deployment(&self) -> DomainResult<String> {
        let url = join_url(&self.api_base, "v13/deployments");
        let resp = self
            .authorized(self.http.post(url))
            .json(&self.deployment_request())
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Vercel deployment request failed: {e}")))?;

        if !ACCEPTED.contains(&resp.status()) {
            return Err(unexpected_status(resp).await);
        }

        let created: DeploymentCreated = resp.json().await.map_err(|e| {
            DomainError::SerializationError(format!("Vercel deployment response: {e}"))
        })?;
        tracing::info!(
            deployment_id = %created.id,
            url = created.url.as_deref().unwrap_or(""),
            "deployment created"
        );
        Ok(created.id)
    }
}

#[async_trait]
impl AgentCensus for VercelClient {
    async fn count_active(&self) -> DomainResult<u32> {
        let url = join_url(&self.api_base, "v6/deployments");
        let limit = CENSUS_PAGE_LIMIT.to_string();
        let resp = self
            .authorized(self.http.get(url))
            .query(&[
                ("projectId", self.project_id.as_str()),
                ("state", "READY"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Vercel census request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(unexpected_status(resp).await);
        }

        let list: DeploymentList = resp
            .json()
            .await
            .map_err(|e| DomainError::SerializationError(format!("Vercel census response: {e}")))?;
        let ready = list
            .deployments
            .iter()
            .filter(|d| d.state.as_deref() == Some("READY"))
            .count();
        Ok(u32::try_from(ready).unwrap_or(u32::MAX))
    }
}
