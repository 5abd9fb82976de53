//! Vercel adapter: deployment creation and the active agent census.

pub mod client;
pub mod models;

pub use client::{VercelClient, PLATFORM};
