//! Observation ports - capabilities the belief store reads world state through.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{RevenueRecord, Service};

/// Bounded-timeout reachability check against one external service.
#[async_trait]
pub trait ServiceProbe: Send + Sync {
    /// The service this probe checks.
    fn service(&self) -> Service;

    /// Returns `true` when the service answered with a healthy status.
    ///
    /// Implementations never fail: network errors, timeouts and unexpected
    /// statuses all map to `false`.
    async fn probe(&self) -> bool;
}

/// Source of the current business metrics record.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch the most recent record with internal bookkeeping fields removed.
    async fn fetch(&self) -> DomainResult<RevenueRecord>;
}

/// Local CPU utilisation sampler.
#[async_trait]
pub trait ResourceSampler: Send + Sync {
    /// CPU utilisation percent over a short window, or `None` when sampling
    /// is unsupported on this host.
    async fn sample_cpu(&self) -> Option<f32>;
}

/// Counts agents currently deployed and serving.
#[async_trait]
pub trait AgentCensus: Send + Sync {
    async fn count_active(&self) -> DomainResult<u32>;
}
