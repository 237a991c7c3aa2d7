//! Concurrent scan orchestrator
//!
//! Fans one identifier out across site probes with bounded concurrency.
//! Individual probe failures never abort a batch; they fold into
//! `Status::Error` results with a humanized reason.

mod proxy;

pub use proxy::ProxyPool;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::join_all;
use rand::seq::SliceRandom;
use reqwest::Client;
use tokio::sync::Semaphore;

use crate::error::{Result, UserScoutError};
use crate::probe::{Category, HttpMethod, Site};
use crate::types::{MetricsSnapshot, ScanConfig, ScanMetrics, ScanResult, Status, TargetKind};

/// Browser user agents rotated across probes. Several endpoints reject
/// obvious bot agents outright.
static USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
];

fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Availability scanner with bounded concurrency and shared metrics
pub struct Scanner {
    config: ScanConfig,
    client: Client,
    proxies: Option<ProxyPool>,
    semaphore: Arc<Semaphore>,
    metrics: Arc<ScanMetrics>,
}

impl Scanner {
    /// Create a scanner with default configuration.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default()).unwrap_or_else(|e| {
            // Only reachable with a proxy file in the default config,
            // which Default never sets.
            tracing::warn!("Scanner construction fell back to defaults: {e}");
            Self {
                config: ScanConfig::default(),
                client: Client::new(),
                proxies: None,
                semaphore: Arc::new(Semaphore::new(ScanConfig::default().concurrency)),
                metrics: Arc::new(ScanMetrics::new()),
            }
        })
    }

    /// Create a scanner with custom configuration. Fails when the
    /// configured proxy file cannot be loaded.
    pub fn with_config(config: ScanConfig) -> Result<Self> {
        let user_agent = format!("user-scout/{}", env!("CARGO_PKG_VERSION"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&user_agent)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build pooled HTTP client: {e}. Using default.");
                Client::new()
            });

        let proxies = match &config.proxy_file {
            Some(path) => Some(ProxyPool::load(path, config.timeout, &user_agent)?),
            None => None,
        };

        let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));

        Ok(Self {
            client,
            proxies,
            semaphore,
            metrics: Arc::new(ScanMetrics::new()),
            config,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Probe one site for one identifier. Infallible by design: transport
    /// and classification failures come back as `Status::Error` results.
    pub async fn check_site(&self, site: &Site, identifier: &str) -> ScanResult {
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return self.error_result(site, identifier, "scanner is shut down".to_string())
            }
        };

        let start = Instant::now();
        let (status, reason) = match self.dispatch(site, identifier).await {
            Ok(outcome) => outcome,
            Err(e) => (Status::Error, Some(humanize_error(&e))),
        };
        let duration = start.elapsed();

        self.metrics.record_probe(duration.as_millis() as u64);
        if status == Status::Error {
            self.metrics.record_error();
        }

        tracing::debug!(
            site = %site.name,
            identifier = %identifier,
            status = ?status,
            duration_ms = %duration.as_millis(),
            "Probe completed"
        );

        ScanResult {
            identifier: identifier.to_string(),
            site: site.name.to_string(),
            category: site.category.to_string(),
            kind: site.kind,
            status,
            url: site.profile_url.to_string(),
            reason,
            checked_at: Utc::now(),
            duration: Some(duration),
        }
    }

    /// Probe every given site concurrently for one identifier.
    pub async fn check_sites(&self, sites: &[&Site], identifier: &str) -> Vec<ScanResult> {
        let batch_start = Instant::now();
        let futures = sites.iter().map(|site| self.check_site(site, identifier));
        let results = join_all(futures).await;

        let errors = results
            .iter()
            .filter(|r| r.status == Status::Error)
            .count();
        tracing::info!(
            identifier = %identifier,
            sites = %sites.len(),
            errors = %errors,
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Batch scan completed"
        );

        results
    }

    /// Probe every catalog site of the given kind.
    pub async fn check_all(&self, kind: TargetKind, identifier: &str) -> Vec<ScanResult> {
        let sites = crate::probe::sites_for(kind);
        self.check_sites(&sites, identifier).await
    }

    /// Probe every catalog site of one category for the given kind.
    pub async fn check_category(
        &self,
        category: Category,
        kind: TargetKind,
        identifier: &str,
    ) -> Vec<ScanResult> {
        let sites = crate::probe::sites_in_category(category, kind);
        self.check_sites(&sites, identifier).await
    }

    async fn dispatch(
        &self,
        site: &Site,
        identifier: &str,
    ) -> Result<(Status, Option<String>)> {
        let client = match &self.proxies {
            Some(pool) => pool.next_client(),
            None => self.client.clone(),
        };

        let url = site.request_url(identifier);
        let mut request = match site.method {
            HttpMethod::Get => client.get(&url),
            HttpMethod::Post => client.post(&url),
        };

        request = request
            .header("User-Agent", random_user_agent())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9");

        for (name, value) in site.headers {
            request = request.header(*name, *value);
        }

        if let Some(body) = site.request_body(identifier) {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status_code = response.status().as_u16();

        // Status-only rules never need the body.
        let body = match site.rule {
            crate::probe::ProbeRule::Status { .. } => String::new(),
            crate::probe::ProbeRule::BodyContains { .. } => response.text().await?,
        };

        Ok(site.rule.classify(status_code, &body))
    }

    fn error_result(&self, site: &Site, identifier: &str, reason: String) -> ScanResult {
        ScanResult {
            identifier: identifier.to_string(),
            site: site.name.to_string(),
            category: site.category.to_string(),
            kind: site.kind,
            status: Status::Error,
            url: site.profile_url.to_string(),
            reason: Some(reason),
            checked_at: Utc::now(),
            duration: None,
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn transport errors into reasons a user can act on.
fn humanize_error(err: &UserScoutError) -> String {
    match err {
        UserScoutError::Network { message, .. } => match message.as_str() {
            "Request timed out" => "Connection timed out".to_string(),
            "Connection failed" => "Could not reach the server".to_string(),
            other => other.to_string(),
        },
        other => other.to_string(),
    }
}
