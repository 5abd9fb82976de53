pub mod belief;
pub mod config;
pub mod desire;
pub mod intention;
pub mod state;

pub use belief::{BeliefSnapshot, CloudStatus, RevenueRecord, Service};
pub use config::{
    AgentConfig, Config, DashboardConfig, DesireRulesConfig, GithubConfig, HuggingfaceConfig,
    LoggingConfig, MaintenanceConfig, ProbeConfig, Secret, SupabaseConfig, VercelConfig,
};
pub use desire::{Desire, DesireKind, Goal, Remediation};
pub use intention::{Action, ExecutionOutcome, Intention, MaintenanceTask};
pub use state::{AgentState, LoopStatus};
