//! Application layer: composition of services and adapters into a runnable
//! agent.

pub mod agent_runtime;

pub use agent_runtime::AgentRuntime;
