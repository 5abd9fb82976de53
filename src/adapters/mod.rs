//! Adapters implementing the domain ports against real services.

pub mod dashboard;
pub mod github;
pub mod http;
pub mod maintenance;
pub mod probes;
pub mod supabase;
pub mod vercel;

pub use dashboard::DashboardServer;
pub use github::GitHubWorkflowClient;
pub use maintenance::LocalMaintenance;
pub use probes::{probe_set, HttpServiceProbe};
pub use supabase::SupabaseMetricsSource;
pub use vercel::VercelClient;
