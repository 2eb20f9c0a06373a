//! Request metrics in Prometheus text and JSON

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info_span, Instrument};

/// What a request did, as far as the counters care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    ProjectSave,
    Advisory,
    Export,
    Other,
}

impl RouteKind {
    fn of(method: &Method, path: &str) -> Self {
        if path.ends_with("/export.csv") {
            RouteKind::Export
        } else if path.contains("/advisory/") || path.ends_with("/reports/regional") {
            RouteKind::Advisory
        } else if path.starts_with("/api/v1/projects")
            && (*method == Method::POST || *method == Method::PATCH)
        {
            RouteKind::ProjectSave
        } else {
            RouteKind::Other
        }
    }
}

pub struct Metrics {
    pub http_requests_total: AtomicU64,
    pub http_requests_2xx: AtomicU64,
    pub http_requests_4xx: AtomicU64,
    pub http_requests_5xx: AtomicU64,
    pub http_request_duration_ms_total: AtomicU64,
    pub in_flight_requests: AtomicU64,
    /// Project writes (save, patch, location, attachments) that succeeded
    pub project_writes_total: AtomicU64,
    /// Project writes rejected with 422
    pub project_writes_rejected: AtomicU64,
    pub advisory_requests_total: AtomicU64,
    /// Advisory requests refused because one for the same key was in flight
    pub advisory_busy_total: AtomicU64,
    pub csv_exports_total: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            http_requests_total: AtomicU64::new(0),
            http_requests_2xx: AtomicU64::new(0),
            http_requests_4xx: AtomicU64::new(0),
            http_requests_5xx: AtomicU64::new(0),
            http_request_duration_ms_total: AtomicU64::new(0),
            in_flight_requests: AtomicU64::new(0),
            project_writes_total: AtomicU64::new(0),
            project_writes_rejected: AtomicU64::new(0),
            advisory_requests_total: AtomicU64::new(0),
            advisory_busy_total: AtomicU64::new(0),
            csv_exports_total: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an HTTP request
    pub fn record_request(&self, status: StatusCode, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_ms_total
            .fetch_add(duration_ms, Ordering::Relaxed);

        let code = status.as_u16();
        if (200..300).contains(&code) {
            self.http_requests_2xx.fetch_add(1, Ordering::Relaxed);
        } else if (400..500).contains(&code) {
            self.http_requests_4xx.fetch_add(1, Ordering::Relaxed);
        } else if code >= 500 {
            self.http_requests_5xx.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_route(&self, kind: RouteKind, status: StatusCode) {
        match kind {
            RouteKind::ProjectSave if status.is_success() => {
                self.project_writes_total.fetch_add(1, Ordering::Relaxed);
            }
            RouteKind::ProjectSave if status == StatusCode::UNPROCESSABLE_ENTITY => {
                self.project_writes_rejected.fetch_add(1, Ordering::Relaxed);
            }
            RouteKind::Advisory => {
                self.advisory_requests_total.fetch_add(1, Ordering::Relaxed);
                if status == StatusCode::CONFLICT {
                    self.advisory_busy_total.fetch_add(1, Ordering::Relaxed);
                }
            }
            RouteKind::Export if status.is_success() => {
                self.csv_exports_total.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    fn counters(&self) -> [(&'static str, &'static str, &'static str, u64); 9] {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        [
            ("http_requests_total", "counter", "Total number of HTTP requests", load(&self.http_requests_total)),
            ("http_request_duration_ms_total", "counter", "Total HTTP request duration in milliseconds", load(&self.http_request_duration_ms_total)),
            ("http_requests_in_flight", "gauge", "Requests currently being handled", load(&self.in_flight_requests)),
            ("project_writes_total", "counter", "Project writes that succeeded", load(&self.project_writes_total)),
            ("project_writes_rejected_total", "counter", "Project writes rejected by validation", load(&self.project_writes_rejected)),
            ("advisory_requests_total", "counter", "Advisory requests received", load(&self.advisory_requests_total)),
            ("advisory_busy_total", "counter", "Advisory requests refused while another was in flight", load(&self.advisory_busy_total)),
            ("csv_exports_total", "counter", "CSV exports served", load(&self.csv_exports_total)),
            ("uptime_seconds", "gauge", "Server uptime in seconds", self.uptime_seconds()),
        ]
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        for (name, kind, help, value) in self.counters() {
            output.push_str(&format!("# HELP {} {}\n# TYPE {} {}\n{} {}\n", name, help, name, kind, name, value));
        }

        output.push_str("# HELP http_requests_by_status HTTP requests by status code range\n");
        output.push_str("# TYPE http_requests_by_status counter\n");
        for (range, counter) in [
            ("2xx", &self.http_requests_2xx),
            ("4xx", &self.http_requests_4xx),
            ("5xx", &self.http_requests_5xx),
        ] {
            output.push_str(&format!(
                "http_requests_by_status{{status=\"{}\"}} {}\n",
                range,
                counter.load(Ordering::Relaxed)
            ));
        }

        output
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        serde_json::json!({
            "http": {
                "requests_total": load(&self.http_requests_total),
                "requests_2xx": load(&self.http_requests_2xx),
                "requests_4xx": load(&self.http_requests_4xx),
                "requests_5xx": load(&self.http_requests_5xx),
                "request_duration_ms_total": load(&self.http_request_duration_ms_total),
                "in_flight": load(&self.in_flight_requests),
            },
            "projects": {
                "writes": load(&self.project_writes_total),
                "rejected": load(&self.project_writes_rejected),
                "exports": load(&self.csv_exports_total),
            },
            "advisory": {
                "requests": load(&self.advisory_requests_total),
                "busy": load(&self.advisory_busy_total),
            },
            "uptime_seconds": self.uptime_seconds(),
        })
    }
}

/// Metrics middleware
pub async fn metrics_middleware(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().path().to_string();
    let kind = RouteKind::of(&method, &uri);

    metrics.in_flight_requests.fetch_add(1, Ordering::Relaxed);

    let response = next
        .run(request)
        .instrument(info_span!("http_request", %method, %uri))
        .await;

    let duration = start.elapsed();
    let status = response.status();

    debug!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    metrics.record_request(status, duration.as_millis() as u64);
    metrics.record_route(kind, status);
    metrics.in_flight_requests.fetch_sub(1, Ordering::Relaxed);

    response
}

/// Handler for /metrics endpoint (Prometheus format)
pub async fn prometheus_metrics(State(metrics): State<Arc<Metrics>>) -> String {
    metrics.export_prometheus()
}

/// Handler for /metrics.json endpoint
pub async fn json_metrics(State(metrics): State<Arc<Metrics>>) -> axum::Json<serde_json::Value> {
    axum::Json(metrics.export_json())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request() {
        let metrics = Metrics::new();

        metrics.record_request(StatusCode::OK, 50);
        metrics.record_request(StatusCode::NOT_FOUND, 10);
        metrics.record_request(StatusCode::INTERNAL_SERVER_ERROR, 100);

        assert_eq!(metrics.http_requests_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.http_requests_2xx.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.http_requests_4xx.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.http_requests_5xx.load(Ordering::Relaxed), 1);
        assert_eq!(
            metrics.http_request_duration_ms_total.load(Ordering::Relaxed),
            160
        );
    }

    #[test]
    fn test_route_kinds() {
        assert_eq!(
            RouteKind::of(&Method::GET, "/api/v1/projects/export.csv"),
            RouteKind::Export
        );
        assert_eq!(
            RouteKind::of(&Method::POST, "/api/v1/projects/p-1/advisory/risk"),
            RouteKind::Advisory
        );
        assert_eq!(
            RouteKind::of(&Method::POST, "/api/v1/reports/regional"),
            RouteKind::Advisory
        );
        assert_eq!(
            RouteKind::of(&Method::PATCH, "/api/v1/projects/p-1"),
            RouteKind::ProjectSave
        );
        assert_eq!(RouteKind::of(&Method::GET, "/api/v1/projects"), RouteKind::Other);
    }

    #[test]
    fn test_domain_counters() {
        let metrics = Metrics::new();

        metrics.record_route(RouteKind::ProjectSave, StatusCode::CREATED);
        metrics.record_route(RouteKind::ProjectSave, StatusCode::UNPROCESSABLE_ENTITY);
        metrics.record_route(RouteKind::Advisory, StatusCode::OK);
        metrics.record_route(RouteKind::Advisory, StatusCode::CONFLICT);
        metrics.record_route(RouteKind::Export, StatusCode::OK);

        let json = metrics.export_json();
        assert_eq!(json["projects"]["writes"], 1);
        assert_eq!(json["projects"]["rejected"], 1);
        assert_eq!(json["projects"]["exports"], 1);
        assert_eq!(json["advisory"]["requests"], 2);
        assert_eq!(json["advisory"]["busy"], 1);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_request(StatusCode::OK, 50);

        let output = metrics.export_prometheus();
        assert!(output.contains("http_requests_total 1"));
        assert!(output.contains("http_requests_by_status{status=\"2xx\"} 1"));
        assert!(output.contains("# TYPE advisory_busy_total counter"));
        assert!(output.contains("uptime_seconds"));
    }
}
