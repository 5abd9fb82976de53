//! Reasoning services: the four pipeline stages and the loop that drives them.

pub mod belief_store;
pub mod control_loop;
pub mod desire_generator;
pub mod intention_executor;
pub mod intention_planner;

pub use belief_store::{BeliefStore, ServiceProbes};
pub use control_loop::{ControlLoop, CycleReport, LoopConfig, Pipeline};
pub use desire_generator::DesireGenerator;
pub use intention_executor::{ActionSinks, IntentionExecutor, ADMISSION_CAP};
pub use intention_planner::IntentionPlanner;
