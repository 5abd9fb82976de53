//! Shared HTTP plumbing for the REST adapters.

use reqwest::{Client, Response};
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};

/// User agent sent with every outbound request. GitHub rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("bdi-agent/", env!("CARGO_PKG_VERSION"));

/// Longest response body kept in an error.
const MAX_ERROR_BODY: usize = 512;

/// Build a client whose requests are bounded by `timeout`.
pub fn build_client(timeout: Duration) -> DomainResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DomainError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Consume a non-accepted response into an `UnexpectedStatus` error.
pub async fn unexpected_status(resp: Response) -> DomainError {
    let status = resp.status().as_u16();
    let mut body = resp.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    DomainError::UnexpectedStatus { status, body }
}
