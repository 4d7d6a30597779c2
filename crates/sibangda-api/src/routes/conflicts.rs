//! # Conflict Potential API
//!
//! CRUD over conflict-potential records, the per-district map markers, the
//! location drill-down and scene image upload.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use sibangda_core::{
    conflict_rollup, drill_down, ConflictRecord, ConflictRollup, District, LocationPoint,
};

use super::records::{self, DeleteQuery, DeleteResponse};
use crate::error::AppError;
use crate::extractors::{extract_filter, extract_json, extract_query, DistrictQuery};
use crate::state::AppState;

/// Build the conflicts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/conflicts", get(list_conflicts).post(create_conflict))
        .route("/v1/conflicts/rollup", get(rollup_conflicts))
        .route("/v1/conflicts/drill-down/:district", get(drill_down_conflicts))
        .route(
            "/v1/conflicts/:id",
            get(get_conflict).put(update_conflict).delete(delete_conflict),
        )
        .route("/v1/conflicts/:id/image", post(upload_conflict_image))
}

/// GET /v1/conflicts: List conflict records.
#[utoipa::path(
    get,
    path = "/v1/conflicts",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Conflict records in display order", body = Vec<ConflictRecord>),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "conflicts"
)]
async fn list_conflicts(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<ConflictRecord>>, AppError> {
    let filter = extract_filter(query)?;
    Ok(Json(records::list(&state, filter)))
}

/// POST /v1/conflicts: Insert or replace a conflict record by id.
#[utoipa::path(
    post,
    path = "/v1/conflicts",
    request_body = ConflictRecord,
    responses(
        (status = 201, description = "Record inserted", body = ConflictRecord),
        (status = 200, description = "Existing record replaced", body = ConflictRecord),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "conflicts"
)]
async fn create_conflict(
    State(state): State<AppState>,
    body: Result<Json<ConflictRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<ConflictRecord>), AppError> {
    records::upsert(&state, extract_json(body)?)
}

/// GET /v1/conflicts/:id: Get a conflict record.
#[utoipa::path(
    get,
    path = "/v1/conflicts/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record found", body = ConflictRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "conflicts"
)]
async fn get_conflict(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConflictRecord>, AppError> {
    records::get(&state, id).map(Json)
}

/// PUT /v1/conflicts/:id: Upsert a conflict record at the path id.
#[utoipa::path(
    put,
    path = "/v1/conflicts/{id}",
    params(("id" = String, Path, description = "Record ID")),
    request_body = ConflictRecord,
    responses(
        (status = 200, description = "Existing record replaced", body = ConflictRecord),
        (status = 201, description = "Record inserted", body = ConflictRecord),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "conflicts"
)]
async fn update_conflict(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ConflictRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<ConflictRecord>), AppError> {
    records::upsert_at(&state, id, extract_json(body)?)
}

/// DELETE /v1/conflicts/:id: Remove a conflict record.
#[utoipa::path(
    delete,
    path = "/v1/conflicts/{id}",
    params(("id" = String, Path, description = "Record ID"), DeleteQuery),
    responses(
        (status = 200, description = "Removal outcome", body = DeleteResponse),
    ),
    tag = "conflicts"
)]
async fn delete_conflict(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    records::delete::<ConflictRecord>(&state, id, extract_query(query)?)
}

/// GET /v1/conflicts/rollup: One conflict map marker per district.
#[utoipa::path(
    get,
    path = "/v1/conflicts/rollup",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Markers in district order", body = Vec<ConflictRollup>),
    ),
    tag = "conflicts"
)]
async fn rollup_conflicts(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<ConflictRollup>>, AppError> {
    let filter = extract_filter(query)?;
    let records: Vec<ConflictRecord> = records::list(&state, filter);
    Ok(Json(conflict_rollup(&records)))
}

/// GET /v1/conflicts/drill-down/:district: Incidents per location.
#[utoipa::path(
    get,
    path = "/v1/conflicts/drill-down/{district}",
    params(("district" = String, Path, description = "District display name")),
    responses(
        (status = 200, description = "Incident locations", body = Vec<LocationPoint>),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "conflicts"
)]
async fn drill_down_conflicts(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<Json<Vec<LocationPoint>>, AppError> {
    let district: District = district.parse()?;
    let snapshot = state.store.current();
    Ok(Json(drill_down(&snapshot.conflicts, district)))
}

/// POST /v1/conflicts/:id/image: Attach a scene image.
///
/// The request body is the raw image; `Content-Type` must be `image/*`.
#[utoipa::path(
    post,
    path = "/v1/conflicts/{id}/image",
    params(("id" = String, Path, description = "Record ID")),
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 200, description = "Image attached", body = ConflictRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 413, description = "Image too large", body = crate::error::ErrorBody),
        (status = 415, description = "Not an image", body = crate::error::ErrorBody),
    ),
    tag = "conflicts"
)]
async fn upload_conflict_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ConflictRecord>, AppError> {
    let image = records::read_image(&state, &headers, body)?;
    let id = records::parse_id(id)?;
    let updated = state.store.update(|snapshot| {
        snapshot
            .attach_image::<ConflictRecord>(&id, image)
            .ok_or_else(|| AppError::record_not_found("conflict", id.as_str()))
    })?;
    tracing::info!(id = %id, "conflict image attached");
    Ok(Json(updated))
}
