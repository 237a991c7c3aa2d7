//! Core types and structures for user-scout

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// What kind of identifier a scan targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Username,
    Email,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Username => write!(f, "username"),
            TargetKind::Email => write!(f, "email"),
        }
    }
}

/// Outcome of a single site probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Taken,
    Available,
    Error,
}

impl Status {
    /// Human label, phrased for the target kind: usernames read
    /// Taken/Available, emails read Registered/Not Registered.
    pub fn label(&self, kind: TargetKind) -> &'static str {
        match (self, kind) {
            (Status::Error, _) => "Error",
            (Status::Taken, TargetKind::Email) => "Registered",
            (Status::Available, TargetKind::Email) => "Not Registered",
            (Status::Taken, TargetKind::Username) => "Taken",
            (Status::Available, TargetKind::Username) => "Available",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label(TargetKind::Username))
    }
}

/// Result of probing one site for one identifier
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub identifier: String,
    pub site: String,
    pub category: String,
    pub kind: TargetKind,
    pub status: Status,
    pub url: String,
    pub reason: Option<String>,
    pub checked_at: DateTime<Utc>,
    pub duration: Option<Duration>,
}

impl ScanResult {
    /// Status label phrased for this result's target kind.
    pub fn status_label(&self) -> &'static str {
        self.status.label(self.kind)
    }

    pub fn has_reason(&self) -> bool {
        self.reason.is_some()
    }

    pub fn reason_text(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }
}

/// Configuration for the scan orchestrator
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum in-flight probes
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Optional file of `host:port` proxy lines, rotated per request
    pub proxy_file: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 20,
            timeout: Duration::from_secs(5),
            proxy_file: None,
        }
    }
}

impl ScanConfig {
    /// Apply `USER_SCOUT_*` environment overrides on top of this config.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(secs) = env_parse::<u64>("USER_SCOUT_TIMEOUT") {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = env_parse::<usize>("USER_SCOUT_CONCURRENCY") {
            self.concurrency = n.max(1);
        }
        if self.proxy_file.is_none() {
            if let Ok(path) = std::env::var("USER_SCOUT_PROXY_FILE") {
                if !path.is_empty() {
                    self.proxy_file = Some(PathBuf::from(path));
                }
            }
        }
        self
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

/// Scan performance counters, shared across concurrent probes
#[derive(Debug, Default)]
pub struct ScanMetrics {
    probes_dispatched: AtomicU64,
    errors_encountered: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_probe(&self, latency_ms: u64) {
        self.probes_dispatched.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors_encountered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            probes_dispatched: self.probes_dispatched.load(Ordering::Relaxed),
            errors_encountered: self.errors_encountered.load(Ordering::Relaxed),
            total_latency_ms: self.total_latency_ms.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`ScanMetrics`]
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub probes_dispatched: u64,
    pub errors_encountered: u64,
    pub total_latency_ms: u64,
}

impl MetricsSnapshot {
    pub fn avg_check_time_ms(&self) -> f64 {
        if self.probes_dispatched == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.probes_dispatched as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_by_target_kind() {
        assert_eq!(Status::Available.label(TargetKind::Username), "Available");
        assert_eq!(Status::Taken.label(TargetKind::Username), "Taken");
        assert_eq!(Status::Taken.label(TargetKind::Email), "Registered");
        assert_eq!(Status::Available.label(TargetKind::Email), "Not Registered");
        assert_eq!(Status::Error.label(TargetKind::Email), "Error");
    }

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.proxy_file.is_none());
    }

    #[test]
    fn test_metrics_snapshot_average() {
        let metrics = ScanMetrics::new();
        assert_eq!(metrics.snapshot().avg_check_time_ms(), 0.0);

        metrics.record_probe(100);
        metrics.record_probe(200);
        metrics.record_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.probes_dispatched, 2);
        assert_eq!(snapshot.errors_encountered, 1);
        assert_eq!(snapshot.avg_check_time_ms(), 150.0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Taken).unwrap(), "\"taken\"");
        assert_eq!(
            serde_json::to_string(&TargetKind::Email).unwrap(),
            "\"email\""
        );
    }
}
