//! # Foreigner Monitoring (Wasnas) API
//!
//! CRUD over per-district foreign national and institution counts.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sibangda_core::ForeignerRecord;

use super::records::{self, DeleteQuery, DeleteResponse};
use crate::error::AppError;
use crate::extractors::{extract_filter, extract_json, extract_query, DistrictQuery};
use crate::state::AppState;

/// Build the foreigners router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/foreigners", get(list_foreigners).post(create_foreigner))
        .route(
            "/v1/foreigners/:id",
            get(get_foreigner)
                .put(update_foreigner)
                .delete(delete_foreigner),
        )
}

/// GET /v1/foreigners: List foreigner monitoring records.
#[utoipa::path(
    get,
    path = "/v1/foreigners",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Records in display order", body = Vec<ForeignerRecord>),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "foreigners"
)]
async fn list_foreigners(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<ForeignerRecord>>, AppError> {
    let filter = extract_filter(query)?;
    Ok(Json(records::list(&state, filter)))
}

/// POST /v1/foreigners: Insert or replace a record by id.
#[utoipa::path(
    post,
    path = "/v1/foreigners",
    request_body = ForeignerRecord,
    responses(
        (status = 201, description = "Record inserted", body = ForeignerRecord),
        (status = 200, description = "Existing record replaced", body = ForeignerRecord),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "foreigners"
)]
async fn create_foreigner(
    State(state): State<AppState>,
    body: Result<Json<ForeignerRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<ForeignerRecord>), AppError> {
    records::upsert(&state, extract_json(body)?)
}

/// GET /v1/foreigners/:id: Get a record.
#[utoipa::path(
    get,
    path = "/v1/foreigners/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record found", body = ForeignerRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "foreigners"
)]
async fn get_foreigner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ForeignerRecord>, AppError> {
    records::get(&state, id).map(Json)
}

/// PUT /v1/foreigners/:id: Upsert a record at the path id.
#[utoipa::path(
    put,
    path = "/v1/foreigners/{id}",
    params(("id" = String, Path, description = "Record ID")),
    request_body = ForeignerRecord,
    responses(
        (status = 200, description = "Existing record replaced", body = ForeignerRecord),
        (status = 201, description = "Record inserted", body = ForeignerRecord),
    ),
    tag = "foreigners"
)]
async fn update_foreigner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ForeignerRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<ForeignerRecord>), AppError> {
    records::upsert_at(&state, id, extract_json(body)?)
}

/// DELETE /v1/foreigners/:id: Remove a record.
#[utoipa::path(
    delete,
    path = "/v1/foreigners/{id}",
    params(("id" = String, Path, description = "Record ID"), DeleteQuery),
    responses(
        (status = 200, description = "Removal outcome", body = DeleteResponse),
    ),
    tag = "foreigners"
)]
async fn delete_foreigner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    records::delete::<ForeignerRecord>(&state, id, extract_query(query)?)
}
