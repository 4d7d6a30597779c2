//! # Prometheus Metrics
//!
//! Prometheus registry for the dashboard API.
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Domain gauges (conflicts by level, handling by status, ormas
//! and foreigner totals) are refreshed from the current snapshot on each
//! `/metrics` scrape (pull model), see the handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use sibangda_core::{ConflictLevel, HandlingStatus, Snapshot};

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Domain gauges (pull model, updated on /metrics scrape) --
    conflicts_total: GaugeVec,
    conflict_incidents_total: Gauge,
    handling_total: GaugeVec,
    ormas_total: Gauge,
    foreigners_total: Gauge,
    foreign_institutions_total: Gauge,
    snapshot_revision: Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

fn register<C: Collector + Clone + 'static>(registry: &Registry, collector: C) -> C {
    registry
        .register(Box::new(collector.clone()))
        .expect("metric can be registered");
    collector
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    ///
    /// Metric names and label sets are static, so construction and
    /// registration cannot fail at runtime.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("sibangda_http_requests_total", "Total HTTP requests"),
                &["method", "path", "status"],
            )
            .expect("metric can be created"),
        );

        let http_request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "sibangda_http_request_duration_seconds",
                    "HTTP request duration in seconds",
                )
                .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
                &["method", "path"],
            )
            .expect("metric can be created"),
        );

        let http_errors_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("sibangda_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
                &["method", "path", "status"],
            )
            .expect("metric can be created"),
        );

        let conflicts_total = register(
            &registry,
            GaugeVec::new(
                Opts::new("sibangda_conflicts_total", "Conflict records by level"),
                &["level"],
            )
            .expect("metric can be created"),
        );

        let conflict_incidents_total = register(
            &registry,
            Gauge::new(
                "sibangda_conflict_incidents_total",
                "Sum of incidents across conflict records",
            )
            .expect("metric can be created"),
        );

        let handling_total = register(
            &registry,
            GaugeVec::new(
                Opts::new("sibangda_handling_total", "Handling records by status"),
                &["status"],
            )
            .expect("metric can be created"),
        );

        let ormas_total = register(
            &registry,
            Gauge::new("sibangda_ormas_total", "Registered civic organizations")
                .expect("metric can be created"),
        );

        let foreigners_total = register(
            &registry,
            Gauge::new("sibangda_foreigners_total", "Foreign nationals under monitoring")
                .expect("metric can be created"),
        );

        let foreign_institutions_total = register(
            &registry,
            Gauge::new(
                "sibangda_foreign_institutions_total",
                "Foreign institutions under monitoring",
            )
            .expect("metric can be created"),
        );

        let snapshot_revision = register(
            &registry,
            Gauge::new("sibangda_snapshot_revision", "Updates applied since start")
                .expect("metric can be created"),
        );

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                conflicts_total,
                conflict_incidents_total,
                handling_total,
                ormas_total,
                foreigners_total,
                foreign_institutions_total,
                snapshot_revision,
            }),
        }
    }

    /// Total request count (sum across all labels).
    pub fn requests(&self) -> u64 {
        sum_counter(&self.inner.http_requests_total)
    }

    /// Total error count (sum across all labels).
    pub fn errors(&self) -> u64 {
        sum_counter(&self.inner.http_errors_total)
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Refresh domain gauges from a snapshot.
    pub fn observe_snapshot(&self, snapshot: &Snapshot, revision: u64) {
        let inner = &self.inner;

        inner.conflicts_total.reset();
        for level in ConflictLevel::ALL {
            let count = snapshot.conflicts.iter().filter(|c| c.level == level).count();
            inner
                .conflicts_total
                .with_label_values(&[level.as_str()])
                .set(count as f64);
        }
        let incidents: u64 = snapshot.conflicts.iter().map(|c| u64::from(c.incidents)).sum();
        inner.conflict_incidents_total.set(incidents as f64);

        inner.handling_total.reset();
        for status in HandlingStatus::ALL {
            let count = snapshot.handling.iter().filter(|h| h.status == status).count();
            inner
                .handling_total
                .with_label_values(&[status.as_str()])
                .set(count as f64);
        }

        inner.ormas_total.set(snapshot.ormas.len() as f64);
        let foreigners: u64 = snapshot.foreigners.iter().map(|f| u64::from(f.count)).sum();
        inner.foreigners_total.set(foreigners as f64);
        let institutions: u64 = snapshot
            .foreigners
            .iter()
            .map(|f| u64::from(f.institutions))
            .sum();
        inner.foreign_institutions_total.set(institutions as f64);
        inner.snapshot_revision.set(revision as f64);
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counter(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|mf| mf.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Middleware that records HTTP request metrics via Prometheus.
///
/// The path label is the matched route template (`/v1/ormas/:id`), so record
/// ids never become label values. Unmatched requests share one label.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}
