//! HTTP reachability probes for the known services.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use super::http::{build_client, join_url};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Config, Service};
use crate::domain::ports::ServiceProbe;
use crate::services::belief_store::ServiceProbes;

/// Probes a service by issuing an unauthenticated GET and checking the
/// status code.
///
/// A 401 from an authenticated endpoint still proves the service is up,
/// so those endpoints accept it as healthy.
#[derive(Debug, Clone)]
pub struct HttpServiceProbe {
    service: Service,
    http: Client,
    url: String,
    healthy_statuses: Vec<u16>,
}

impl HttpServiceProbe {
    pub fn new(
        service: Service,
        url: impl Into<String>,
        healthy_statuses: Vec<u16>,
        timeout: Duration,
    ) -> DomainResult<Self> {
        Ok(Self {
            service,
            http: build_client(timeout)?,
            url: url.into(),
            healthy_statuses,
        })
    }

    /// The standard probe for `service`, aimed at the configured endpoint.
    pub fn for_service(service: Service, config: &Config) -> DomainResult<Self> {
        let timeout = Duration::from_secs(config.probes.timeout_secs);
        let (url, healthy) = match service {
            Service::GithubActions => (join_url(&config.github.api_base, "zen"), vec![200]),
            Service::VercelApi => (join_url(&config.vercel.api_base, "v2/user"), vec![200, 401]),
            Service::SupabaseDb => (join_url(&config.supabase.url, "rest/v1/"), vec![200, 401]),
            Service::Huggingface => (
                join_url(&config.huggingface.api_base, "api/whoami"),
                vec![200, 401],
            ),
        };
        Self::new(service, url, healthy, timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ServiceProbe for HttpServiceProbe {
    fn service(&self) -> Service {
        self.service
    }

    async fn probe(&self) -> bool {
        match self.http.get(&self.url).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let healthy = self.healthy_statuses.contains(&status);
                tracing::debug!(service = %self.service, status, healthy, "probe completed");
                healthy
            }
            Err(e) => {
                tracing::debug!(service = %self.service, error = %e, "probe request failed");
                false
            }
        }
    }
}

/// Build the full probe set from configuration.
pub fn probe_set(config: &Config) -> DomainResult<ServiceProbes> {
    let probe = |service| -> DomainResult<Arc<dyn ServiceProbe>> {
        Ok(Arc::new(HttpServiceProbe::for_service(service, config)?))
    };
    Ok(ServiceProbes {
        github_actions: probe(Service::GithubActions)?,
        vercel_api: probe(Service::VercelApi)?,
        supabase_db: probe(Service::SupabaseDb)?,
        huggingface: probe(Service::Huggingface)?,
    })
}
