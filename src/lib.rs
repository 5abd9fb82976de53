//! BDI agent - a periodic belief/desire/intention control loop.
//!
//! Each cycle the agent observes the world (host load, reachability of
//! GitHub, Vercel, Supabase and HuggingFace, revenue metrics, active agent
//! count), derives prioritized desires from that snapshot, compiles them into
//! concrete intentions and executes the top few against external services.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, capability ports and errors
//! - **Service Layer** (`services`): the pipeline stages and the control loop
//! - **Adapters** (`adapters`): HTTP clients, local maintenance, dashboard
//! - **Infrastructure Layer** (`infrastructure`): config, logging, sampling
//! - **Application Layer** (`application`): wiring into a runnable agent
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use bdi_agent::application::AgentRuntime;
//! use bdi_agent::infrastructure::{ConfigLoader, ConfigSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(&ConfigSource::detect(None))?;
//!     let runtime = AgentRuntime::from_config(config)?;
//!     let report = runtime.run_once().await?;
//!     println!("{} intentions planned", report.intentions.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::AgentRuntime;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Action, AgentState, BeliefSnapshot, CloudStatus, Config, Desire, ExecutionOutcome, Goal,
    Intention, LoopStatus, RevenueRecord, Service,
};
pub use infrastructure::config::{ConfigError, ConfigLoader, ConfigSource};
pub use services::{
    BeliefStore, ControlLoop, CycleReport, DesireGenerator, IntentionExecutor, IntentionPlanner,
    LoopConfig, Pipeline,
};
