//! # Dashboard API
//!
//! Read-only endpoints behind the dashboard overview: the district list,
//! the stat cards and chart series, and a full snapshot export.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sibangda_core::{DashboardSnapshot, District, Snapshot};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_filter, DistrictQuery};
use crate::state::{AppState, Revision};

/// Full snapshot export with its revision.
#[derive(Debug, Serialize, ToSchema)]
pub struct SnapshotResponse {
    #[serde(flatten)]
    pub revision: Revision,
    /// All four collections plus the custom map backgrounds.
    #[schema(value_type = Object)]
    pub snapshot: Snapshot,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/districts", get(list_districts))
        .route("/v1/dashboard", get(get_dashboard))
        .route("/v1/snapshot", get(get_snapshot))
}

/// GET /v1/districts: The ten districts in canonical order.
#[utoipa::path(
    get,
    path = "/v1/districts",
    responses(
        (status = 200, description = "District names", body = Vec<District>),
    ),
    tag = "dashboard"
)]
async fn list_districts() -> Json<Vec<District>> {
    Json(District::ALL.to_vec())
}

/// GET /v1/dashboard: Stat cards and chart series.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Dashboard overview", body = DashboardSnapshot),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "dashboard"
)]
async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let filter = extract_filter(query)?;
    let snapshot = state.store.current();
    Ok(Json(DashboardSnapshot::compute(&snapshot, filter)))
}

/// GET /v1/snapshot: Export the whole state.
#[utoipa::path(
    get,
    path = "/v1/snapshot",
    responses(
        (status = 200, description = "Current snapshot", body = SnapshotResponse),
    ),
    tag = "dashboard"
)]
async fn get_snapshot(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let (snapshot, revision) = state.store.current_with_revision();
    Json(SnapshotResponse {
        revision,
        snapshot: Snapshot::clone(&snapshot),
    })
}
