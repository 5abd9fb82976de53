//! Supabase adapter: the revenue metrics source.

pub mod client;

pub use client::SupabaseMetricsSource;
