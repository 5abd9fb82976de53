//! Reads the most recent revenue metrics row over the Supabase REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::adapters::http::{build_client, join_url, unexpected_status};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RevenueRecord, Secret, SupabaseConfig};
use crate::domain::ports::MetricsSource;

/// Upper bound on one metrics request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Row bookkeeping columns that are not part of a revenue record.
const INTERNAL_FIELDS: [&str; 4] = ["id", "name", "created_at", "updated_at"];

#[derive(Debug, Clone)]
pub struct SupabaseMetricsSource {
    http: Client,
    url: String,
    key: Secret,
    table: String,
}

impl SupabaseMetricsSource {
    pub fn new(config: &SupabaseConfig) -> DomainResult<Self> {
        Ok(Self {
            http: build_client(FETCH_TIMEOUT)?,
            url: config.url.clone(),
            key: config.key.clone(),
            table: config.metrics_table.clone(),
        })
    }
}

#[async_trait]
impl MetricsSource for SupabaseMetricsSource {
    async fn fetch(&self) -> DomainResult<RevenueRecord> {
        let url = join_url(&self.url, &format!("rest/v1/{}", self.table));
        let resp = self
            .http
            .get(url)
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", "1"),
            ])
            .header("apikey", self.key.expose())
            .header("Authorization", format!("Bearer {}", self.key.expose()))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Supabase metrics request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(unexpected_status(resp).await);
        }

        let rows: Vec<Map<String, Value>> = resp
            .json()
            .await
            .map_err(|e| DomainError::InvalidRecord(format!("metrics response: {e}")))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::InvalidRecord(format!("table '{}' is empty", self.table)))?;

        parse_record(row)
    }
}

/// Convert one metrics row into a record, rejecting a non-positive target.
pub fn parse_record(mut row: Map<String, Value>) -> DomainResult<RevenueRecord> {
    for field in INTERNAL_FIELDS {
        row.remove(field);
    }
    let record: RevenueRecord = serde_json::from_value(Value::Object(row))
        .map_err(|e| DomainError::InvalidRecord(e.to_string()))?;
    if !(record.target.is_finite() && record.target > 0.0) {
        return Err(DomainError::InvalidRecord(format!(
            "target must be positive, got {}",
            record.target
        )));
    }
    Ok(record)
}
