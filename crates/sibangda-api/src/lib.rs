//! # sibangda-api: Axum API Services for the SIBANGDA Dashboard
//!
//! HTTP surface over [`sibangda_core`]: record upsert and confirmed delete
//! for the four collections, district-filtered listings, per-district
//! rollups and drill-down, dashboard statistics, map backgrounds and the
//! per-view state router.
//!
//! ## API Surface
//!
//! | Prefix                 | Module                    | Domain                     |
//! |------------------------|---------------------------|----------------------------|
//! | `/v1/conflicts/*`      | [`routes::conflicts`]     | Conflict potential         |
//! | `/v1/handling/*`       | [`routes::handling`]      | Conflict handling          |
//! | `/v1/foreigners/*`     | [`routes::foreigners`]    | Foreigner monitoring       |
//! | `/v1/ormas/*`          | [`routes::ormas`]         | Civic organizations        |
//! | `/v1/districts`        | [`routes::dashboard`]     | District list              |
//! | `/v1/dashboard`        | [`routes::dashboard`]     | Overview statistics        |
//! | `/v1/snapshot`         | [`routes::dashboard`]     | Snapshot export            |
//! | `/v1/maps/*`           | [`routes::maps`]          | Map backgrounds            |
//! | `/v1/views/*`          | [`routes::views`]         | View router                |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Smallest request body limit, for JSON record bodies.
const MIN_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Room above the image limit so an oversized upload reaches the handler
/// and is reported with the standard error body.
const BODY_LIMIT_HEADROOM: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = state.config.metrics_enabled;
    let body_limit = state
        .config
        .max_image_bytes
        .saturating_add(BODY_LIMIT_HEADROOM)
        .max(MIN_BODY_LIMIT);

    let mut api = Router::new()
        .merge(routes::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(DefaultBodyLimit::max(body_limit));

    // Only register the metrics middleware and scrape endpoint when enabled.
    if metrics_on {
        api = api
            .route("/metrics", get(prometheus_metrics))
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics));
    }

    api.layer(TraceLayer::new_for_http()).with_state(state)
}

/// GET /metrics: Prometheus metrics scrape endpoint.
///
/// Refreshes domain gauges from the current snapshot (pull model), then
/// gathers and encodes all metrics in Prometheus text exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    let (snapshot, revision) = state.store.current_with_revision();
    metrics.observe_snapshot(&snapshot, revision.revision);

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the snapshot store must accept a writer.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if !state.store.is_writable() {
        return (StatusCode::SERVICE_UNAVAILABLE, "snapshot store locked").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
