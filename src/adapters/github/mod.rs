//! GitHub Actions adapter: workflow dispatch.

pub mod client;
pub mod models;

pub use client::GitHubWorkflowClient;
