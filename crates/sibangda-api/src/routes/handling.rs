//! # Conflict Handling API
//!
//! CRUD over handling-progress records, status rollup for the handling
//! map, per-location drill-down, and the scene image and media gallery.
//!
//! A district's marker status is the worst status among its records
//! (`Pending` over `In Progress` over `Resolved`).

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use sibangda_core::{
    drill_down, handling_rollup, ConflictHandlingRecord, District, HandlingRollup, LocationPoint,
};

use super::records::{self, DeleteQuery, DeleteResponse};
use crate::error::AppError;
use crate::extractors::{extract_filter, extract_json, extract_query, DistrictQuery};
use crate::state::AppState;

/// Build the handling router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/handling", get(list_handling).post(create_handling))
        .route("/v1/handling/rollup", get(rollup_handling))
        .route("/v1/handling/drill-down/:district", get(drill_down_handling))
        .route(
            "/v1/handling/:id",
            get(get_handling).put(update_handling).delete(delete_handling),
        )
        .route("/v1/handling/:id/image", post(upload_handling_image))
        .route("/v1/handling/:id/media", post(append_handling_media))
}

/// GET /v1/handling: List handling records.
#[utoipa::path(
    get,
    path = "/v1/handling",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Handling records in display order", body = Vec<ConflictHandlingRecord>),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn list_handling(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<ConflictHandlingRecord>>, AppError> {
    let filter = extract_filter(query)?;
    Ok(Json(records::list(&state, filter)))
}

/// POST /v1/handling: Insert or replace a handling record by id.
#[utoipa::path(
    post,
    path = "/v1/handling",
    request_body = ConflictHandlingRecord,
    responses(
        (status = 201, description = "Record inserted", body = ConflictHandlingRecord),
        (status = 200, description = "Existing record replaced", body = ConflictHandlingRecord),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn create_handling(
    State(state): State<AppState>,
    body: Result<Json<ConflictHandlingRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<ConflictHandlingRecord>), AppError> {
    records::upsert(&state, extract_json(body)?)
}

/// GET /v1/handling/:id: Get a handling record.
#[utoipa::path(
    get,
    path = "/v1/handling/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record found", body = ConflictHandlingRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn get_handling(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConflictHandlingRecord>, AppError> {
    records::get(&state, id).map(Json)
}

/// PUT /v1/handling/:id: Upsert a handling record at the path id.
#[utoipa::path(
    put,
    path = "/v1/handling/{id}",
    params(("id" = String, Path, description = "Record ID")),
    request_body = ConflictHandlingRecord,
    responses(
        (status = 200, description = "Existing record replaced", body = ConflictHandlingRecord),
        (status = 201, description = "Record inserted", body = ConflictHandlingRecord),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn update_handling(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ConflictHandlingRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<ConflictHandlingRecord>), AppError> {
    records::upsert_at(&state, id, extract_json(body)?)
}

/// DELETE /v1/handling/:id: Remove a handling record.
#[utoipa::path(
    delete,
    path = "/v1/handling/{id}",
    params(("id" = String, Path, description = "Record ID"), DeleteQuery),
    responses(
        (status = 200, description = "Removal outcome", body = DeleteResponse),
    ),
    tag = "handling"
)]
async fn delete_handling(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    records::delete::<ConflictHandlingRecord>(&state, id, extract_query(query)?)
}

/// GET /v1/handling/rollup: One handling map marker per district.
#[utoipa::path(
    get,
    path = "/v1/handling/rollup",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Markers in district order", body = Vec<HandlingRollup>),
    ),
    tag = "handling"
)]
async fn rollup_handling(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<HandlingRollup>>, AppError> {
    let filter = extract_filter(query)?;
    let records: Vec<ConflictHandlingRecord> = records::list(&state, filter);
    Ok(Json(handling_rollup(&records)))
}

/// GET /v1/handling/drill-down/:district: Handled cases per location.
#[utoipa::path(
    get,
    path = "/v1/handling/drill-down/{district}",
    params(("district" = String, Path, description = "District display name")),
    responses(
        (status = 200, description = "Case locations", body = Vec<LocationPoint>),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn drill_down_handling(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<Json<Vec<LocationPoint>>, AppError> {
    let district: District = district.parse()?;
    let snapshot = state.store.current();
    Ok(Json(drill_down(&snapshot.handling, district)))
}

/// POST /v1/handling/:id/image: Attach a scene image.
#[utoipa::path(
    post,
    path = "/v1/handling/{id}/image",
    params(("id" = String, Path, description = "Record ID")),
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 200, description = "Image attached", body = ConflictHandlingRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 413, description = "Image too large", body = crate::error::ErrorBody),
        (status = 415, description = "Not an image", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn upload_handling_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ConflictHandlingRecord>, AppError> {
    let image = records::read_image(&state, &headers, body)?;
    let id = records::parse_id(id)?;
    let updated = state.store.update(|snapshot| {
        snapshot
            .attach_image::<ConflictHandlingRecord>(&id, image)
            .ok_or_else(|| AppError::record_not_found("handling", id.as_str()))
    })?;
    tracing::info!(id = %id, "handling image attached");
    Ok(Json(updated))
}

/// POST /v1/handling/:id/media: Append an item to the media gallery.
#[utoipa::path(
    post,
    path = "/v1/handling/{id}/media",
    params(("id" = String, Path, description = "Record ID")),
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 200, description = "Media appended", body = ConflictHandlingRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 413, description = "Image too large", body = crate::error::ErrorBody),
        (status = 415, description = "Not an image", body = crate::error::ErrorBody),
    ),
    tag = "handling"
)]
async fn append_handling_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ConflictHandlingRecord>, AppError> {
    let media = records::read_image(&state, &headers, body)?;
    let id = records::parse_id(id)?;
    let updated = state.store.update(|snapshot| {
        snapshot
            .append_media(&id, media)
            .ok_or_else(|| AppError::record_not_found("handling", id.as_str()))
    })?;
    tracing::info!(id = %id, "handling media appended");
    Ok(Json(updated))
}
