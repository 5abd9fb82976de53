//! Local housekeeping tasks run by `local_optimization` intentions.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{MaintenanceConfig, MaintenanceTask};
use crate::domain::ports::{MaintenanceRunner, ResourceSampler};

/// Runs maintenance tasks on the local host.
///
/// `cleanup_logs` deletes stale log files under the log directory.
/// `optimize_processes` only takes and logs a fresh CPU sample; it does not
/// touch other processes.
pub struct LocalMaintenance {
    log_dir: PathBuf,
    min_log_age: Duration,
    sampler: Arc<dyn ResourceSampler>,
}

impl LocalMaintenance {
    pub fn new(config: &MaintenanceConfig, sampler: Arc<dyn ResourceSampler>) -> Self {
        Self {
            log_dir: PathBuf::from(&config.log_dir),
            min_log_age: Duration::from_secs(config.min_log_age_secs),
            sampler,
        }
    }

    async fn cleanup_logs(&self) -> DomainResult<String> {
        let dir = self.log_dir.clone();
        let min_age = self.min_log_age;
        let removed = tokio::task::spawn_blocking(move || remove_stale_logs(&dir, min_age))
            .await
            .map_err(|e| DomainError::ActionFailed(format!("log cleanup task failed: {e}")))??;

        tracing::info!(removed, log_dir = %self.log_dir.display(), "log cleanup finished");
        Ok(format!(
            "removed {removed} log file(s) from {}",
            self.log_dir.display()
        ))
    }

    async fn optimize_processes(&self) -> DomainResult<String> {
        let summary = match self.sampler.sample_cpu().await {
            Some(cpu) => {
                tracing::info!(cpu_percent = cpu, "resource sample refreshed");
                format!("cpu usage {cpu:.1}%")
            }
            None => {
                tracing::info!("cpu sampling unavailable on this host");
                "cpu usage unavailable".to_string()
            }
        };
        Ok(summary)
    }
}

#[async_trait]
impl MaintenanceRunner for LocalMaintenance {
    async fn run(&self, task: MaintenanceTask) -> DomainResult<String> {
        match task {
            MaintenanceTask::CleanupLogs => self.cleanup_logs().await,
            MaintenanceTask::OptimizeProcesses => self.optimize_processes().await,
        }
    }
}

/// `app.log`, or a rotated `app.log.2026-10-17` / `app.log.1`.
fn is_log_file(name: &str) -> bool {
    name.ends_with(".log") || name.contains(".log.")
}

/// Recursively delete log files under `dir` last modified at least
/// `min_age` ago. A missing directory counts as nothing to clean.
fn remove_stale_logs(dir: &Path, min_age: Duration) -> io::Result<usize> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let now = SystemTime::now();
    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();

        if file_type.is_dir() {
            removed += remove_stale_logs(&path, min_age)?;
            continue;
        }
        if !file_type.is_file() || !is_log_file(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age < min_age {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            // Removed concurrently, e.g. by the appender's own retention
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    struct FixedSampler(Option<f32>);

    #[async_trait]
    impl ResourceSampler for FixedSampler {
        async fn sample_cpu(&self) -> Option<f32> {
            self.0
        }
    }

    fn runner(dir: &Path, min_age_secs: u64, cpu: Option<f32>) -> LocalMaintenance {
        let config = MaintenanceConfig {
            log_dir: dir.to_string_lossy().into_owned(),
            min_log_age_secs: min_age_secs,
        };
        LocalMaintenance::new(&config, Arc::new(FixedSampler(cpu)))
    }

    fn age(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_is_log_file() {
        assert!(is_log_file("bdi-agent.log"));
        assert!(is_log_file("bdi-agent.log.2026-10-17"));
        assert!(!is_log_file("config.yaml"));
        assert!(!is_log_file("catalog"));
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_stale_logs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("archive");
        fs::create_dir(&nested).unwrap();

        let stale = dir.path().join("bdi-agent.log.2026-10-01");
        let stale_nested = nested.join("worker.log");
        let fresh = dir.path().join("bdi-agent.log.2026-10-17");
        let other = dir.path().join("notes.txt");
        for path in [&stale, &stale_nested, &fresh, &other] {
            File::create(path).unwrap();
        }
        age(&stale, 7200);
        age(&stale_nested, 7200);
        age(&other, 7200);

        let summary = runner(dir.path(), 3600, None)
            .run(MaintenanceTask::CleanupLogs)
            .await
            .unwrap();

        assert!(summary.starts_with("removed 2 log file(s)"));
        assert!(!stale.exists());
        assert!(!stale_nested.exists());
        assert!(fresh.exists());
        assert!(other.exists());
    }

    #[tokio::test]
    async fn test_cleanup_missing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let summary = runner(&missing, 0, None)
            .run(MaintenanceTask::CleanupLogs)
            .await
            .unwrap();
        assert!(summary.starts_with("removed 0"));
    }

    #[tokio::test]
    async fn test_optimize_processes_reports_sample() {
        let dir = tempfile::tempdir().unwrap();
        let summary = runner(dir.path(), 0, Some(42.0))
            .run(MaintenanceTask::OptimizeProcesses)
            .await
            .unwrap();
        assert_eq!(summary, "cpu usage 42.0%");

        let summary = runner(dir.path(), 0, None)
            .run(MaintenanceTask::OptimizeProcesses)
            .await
            .unwrap();
        assert_eq!(summary, "cpu usage unavailable");
    }
}
