//! Local CPU sampling backed by sysinfo.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::ResourceSampler;

/// Default sampling window. Must be at least
/// `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` for a meaningful reading.
pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Samples global CPU utilisation over a short window
///
/// Two refreshes separated by the window are needed because sysinfo
/// computes usage as a delta between refreshes.
pub struct SysinfoSampler {
    system: Arc<Mutex<System>>,
    window: Duration,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_SAMPLE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        let refresh_kind = RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage());
        Self {
            system: Arc::new(Mutex::new(System::new_with_specifics(refresh_kind))),
            window: window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceSampler for SysinfoSampler {
    async fn sample_cpu(&self) -> Option<f32> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return None;
        }

        self.system.lock().await.refresh_cpu_usage();
        tokio::time::sleep(self.window).await;

        let mut sys = self.system.lock().await;
        sys.refresh_cpu_usage();
        if sys.cpus().is_empty() {
            return None;
        }

        let cpu_percent = sys.global_cpu_usage();
        debug!(cpu_percent, window_ms = self.window.as_millis() as u64, "cpu sampled");
        Some(cpu_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_within_bounds() {
        let sampler = SysinfoSampler::new();
        if let Some(cpu) = sampler.sample_cpu().await {
            assert!((0.0..=101.0).contains(&cpu));
        }
    }

    #[test]
    fn test_window_never_below_minimum() {
        let sampler = SysinfoSampler::with_window(Duration::from_millis(1));
        assert!(sampler.window >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    }
}
