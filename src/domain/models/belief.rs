//! Belief models: the per-cycle snapshot of observed world state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};

/// External services whose reachability feeds the belief snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    GithubActions,
    VercelApi,
    SupabaseDb,
    Huggingface,
}

impl Service {
    /// Every known service, in reporting order.
    pub const ALL: [Service; 4] = [
        Service::GithubActions,
        Service::VercelApi,
        Service::SupabaseDb,
        Service::Huggingface,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::GithubActions => "github_actions",
            Service::VercelApi => "vercel_api",
            Service::SupabaseDb => "supabase_db",
            Service::Huggingface => "huggingface",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reachability of each known service.
///
/// A fixed-shape record rather than a map, so a missing or renamed service
/// is a compile error instead of an absent key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudStatus {
    pub github_actions: bool,
    pub vercel_api: bool,
    pub supabase_db: bool,
    pub huggingface: bool,
}

impl CloudStatus {
    pub fn get(&self, service: Service) -> bool {
        match service {
            Service::GithubActions => self.github_actions,
            Service::VercelApi => self.vercel_api,
            Service::SupabaseDb => self.supabase_db,
            Service::Huggingface => self.huggingface,
        }
    }

    pub fn set(&mut self, service: Service, healthy: bool) {
        match service {
            Service::GithubActions => self.github_actions = healthy,
            Service::VercelApi => self.vercel_api = healthy,
            Service::SupabaseDb => self.supabase_db = healthy,
            Service::Huggingface => self.huggingface = healthy,
        }
    }

    /// Number of services currently reachable.
    pub fn healthy_count(&self) -> usize {
        Service::ALL.iter().filter(|s| self.get(**s)).count()
    }

    /// Share of healthy services as a 0-100 health score.
    pub fn health_score(&self) -> u8 {
        let healthy = self.healthy_count() as f64;
        let total = Service::ALL.len() as f64;
        (100.0 * healthy / total).round() as u8
    }
}

/// Business metrics read from the metrics store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub current_month: f64,
    /// Always strictly positive; records violating this are rejected at the source.
    pub target: f64,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default)]
    pub active_streams: u64,
}

impl RevenueRecord {
    /// Record substituted whenever the metrics store cannot be read.
    pub fn placeholder() -> Self {
        Self {
            current_month: 100.0,
            target: 50_000.0,
            growth_rate: 0.0,
            active_streams: 0,
        }
    }

    /// Fraction of the target reached so far.
    pub fn attainment(&self) -> f64 {
        self.current_month / self.target
    }
}

impl Default for RevenueRecord {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Point-in-time observation of system, service and business state.
///
/// Assembled once per cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefSnapshot {
    /// 0-100
    pub system_health: u8,
    /// CPU utilisation percent, 0-100
    pub resource_usage: f32,
    pub active_agent_count: u32,
    pub revenue_metrics: RevenueRecord,
    pub cloud_status: CloudStatus,
    pub last_updated: DateTime<Utc>,
}

impl BeliefSnapshot {
    /// Check the invariants downstream stages rely on.
    pub fn validate(&self) -> DomainResult<()> {
        let revenue = &self.revenue_metrics;
        if !(revenue.target.is_finite() && revenue.target > 0.0) {
            return Err(DomainError::InvalidSnapshot(format!(
                "revenue target must be positive, got {}",
                revenue.target
            )));
        }
        if !revenue.current_month.is_finite() {
            return Err(DomainError::InvalidSnapshot(
                "current_month is not a finite number".to_string(),
            ));
        }
        if self.system_health > 100 {
            return Err(DomainError::InvalidSnapshot(format!(
                "system health out of range: {}",
                self.system_health
            )));
        }
        if !(0.0..=100.0).contains(&self.resource_usage) {
            return Err(DomainError::InvalidSnapshot(format!(
                "resource usage out of range: {}",
                self.resource_usage
            )));
        }
        Ok(())
    }
}
