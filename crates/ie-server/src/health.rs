//! Health checks
//!
//! Two components are checked: the record store (a count must succeed within
//! the check timeout) and the advisory client (degraded without an API key,
//! since every advisory call then returns fallback text).

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ie_store::ProjectRepository;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded)
    }

    /// The worse of two statuses
    fn worst(self, other: HealthStatus) -> HealthStatus {
        match (self, other) {
            (Self::Unhealthy, _) | (_, Self::Unhealthy) => Self::Unhealthy,
            (Self::Degraded, _) | (_, Self::Degraded) => Self::Degraded,
            _ => Self::Healthy,
        }
    }
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        if self.status.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Timeout for the store check
    pub check_timeout: Duration,
    /// How long a report is reused
    pub cache_duration: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(5),
            cache_duration: Duration::from_secs(10),
        }
    }
}

struct CachedHealth {
    report: HealthReport,
    cached_at: Instant,
}

pub struct HealthChecker {
    config: HealthConfig,
    start_time: Instant,
    cache: RwLock<Option<CachedHealth>>,
    store: Arc<dyn ProjectRepository>,
    store_backend: &'static str,
    advisory_key_configured: bool,
}

impl HealthChecker {
    pub fn new(config: HealthConfig, store: Arc<dyn ProjectRepository>) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            cache: RwLock::new(None),
            store,
            store_backend: "memory",
            advisory_key_configured: false,
        }
    }

    /// Label reported for the store component ("memory", "json-file")
    pub fn with_store_backend(mut self, backend: &'static str) -> Self {
        self.store_backend = backend;
        self
    }

    pub fn with_advisory_key(mut self, configured: bool) -> Self {
        self.advisory_key_configured = configured;
        self
    }

    /// Get cached health or perform checks
    pub async fn check(&self) -> HealthReport {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.cached_at.elapsed() < self.config.cache_duration {
                    debug!("Returning cached health report");
                    return cached.report.clone();
                }
            }
        }

        let report = self.perform_checks().await;

        let mut cache = self.cache.write().await;
        *cache = Some(CachedHealth {
            report: report.clone(),
            cached_at: Instant::now(),
        });

        report
    }

    async fn perform_checks(&self) -> HealthReport {
        let components = vec![self.check_store().await, self.check_advisory()];
        let status = components
            .iter()
            .fold(HealthStatus::Healthy, |acc, c| acc.worst(c.status));

        if !status.is_healthy() {
            warn!(?status, "Health check failed");
        }

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_store(&self) -> ComponentHealth {
        let start = Instant::now();

        let (status, message, records) =
            match tokio::time::timeout(self.config.check_timeout, self.store.count()).await {
                Ok(Ok(count)) => (HealthStatus::Healthy, "Store readable".to_string(), Some(count)),
                Ok(Err(e)) => (HealthStatus::Unhealthy, e.to_string(), None),
                Err(_) => (
                    HealthStatus::Unhealthy,
                    "Store check timed out".to_string(),
                    None,
                ),
            };

        ComponentHealth {
            name: "store".to_string(),
            status,
            message: Some(message),
            response_time_ms: start.elapsed().as_millis() as u64,
            details: Some(serde_json::json!({
                "backend": self.store_backend,
                "records": records,
            })),
        }
    }

    fn check_advisory(&self) -> ComponentHealth {
        let (status, message) = if self.advisory_key_configured {
            (HealthStatus::Healthy, "API key configured")
        } else {
            (
                HealthStatus::Degraded,
                "API key not configured; advisory calls return fallback text",
            )
        };

        ComponentHealth {
            name: "advisory".to_string(),
            status,
            message: Some(message.to_string()),
            response_time_ms: 0,
            details: None,
        }
    }
}

/// State for the health routes
pub struct HealthState {
    pub health: Arc<HealthChecker>,
}

/// Liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check with the full report
pub async fn readiness(State(state): State<Arc<HealthState>>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.check().await;
    let status = report.http_status();
    (status, Json(report))
}
