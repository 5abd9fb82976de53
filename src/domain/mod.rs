//! Domain layer for the BDI agent
//!
//! Pure data types for beliefs, desires and intentions, the capability ports
//! the reasoning cycle calls through, and the domain error type.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
