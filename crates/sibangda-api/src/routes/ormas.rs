//! # Civic Organization (Ormas) API
//!
//! CRUD over registered organizations and the category tally behind the
//! dashboard pie chart.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sibangda_core::{group_by_category, CategoryCount, OrmasRecord};

use super::records::{self, DeleteQuery, DeleteResponse};
use crate::error::AppError;
use crate::extractors::{extract_filter, extract_json, extract_query, DistrictQuery};
use crate::state::AppState;

/// Build the ormas router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/ormas", get(list_ormas).post(create_ormas))
        .route("/v1/ormas/categories", get(ormas_categories))
        .route(
            "/v1/ormas/:id",
            get(get_ormas).put(update_ormas).delete(delete_ormas),
        )
}

/// GET /v1/ormas: List organizations.
#[utoipa::path(
    get,
    path = "/v1/ormas",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Organizations in display order", body = Vec<OrmasRecord>),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "ormas"
)]
async fn list_ormas(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<OrmasRecord>>, AppError> {
    let filter = extract_filter(query)?;
    Ok(Json(records::list(&state, filter)))
}

/// POST /v1/ormas: Insert or replace an organization by id.
#[utoipa::path(
    post,
    path = "/v1/ormas",
    request_body = OrmasRecord,
    responses(
        (status = 201, description = "Record inserted", body = OrmasRecord),
        (status = 200, description = "Existing record replaced", body = OrmasRecord),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "ormas"
)]
async fn create_ormas(
    State(state): State<AppState>,
    body: Result<Json<OrmasRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<OrmasRecord>), AppError> {
    records::upsert(&state, extract_json(body)?)
}

/// GET /v1/ormas/:id: Get an organization.
#[utoipa::path(
    get,
    path = "/v1/ormas/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record found", body = OrmasRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "ormas"
)]
async fn get_ormas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrmasRecord>, AppError> {
    records::get(&state, id).map(Json)
}

/// PUT /v1/ormas/:id: Upsert an organization at the path id.
#[utoipa::path(
    put,
    path = "/v1/ormas/{id}",
    params(("id" = String, Path, description = "Record ID")),
    request_body = OrmasRecord,
    responses(
        (status = 200, description = "Existing record replaced", body = OrmasRecord),
        (status = 201, description = "Record inserted", body = OrmasRecord),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "ormas"
)]
async fn update_ormas(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OrmasRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<OrmasRecord>), AppError> {
    records::upsert_at(&state, id, extract_json(body)?)
}

/// DELETE /v1/ormas/:id: Remove an organization.
#[utoipa::path(
    delete,
    path = "/v1/ormas/{id}",
    params(("id" = String, Path, description = "Record ID"), DeleteQuery),
    responses(
        (status = 200, description = "Removal outcome", body = DeleteResponse),
    ),
    tag = "ormas"
)]
async fn delete_ormas(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    records::delete::<OrmasRecord>(&state, id, extract_query(query)?)
}

/// GET /v1/ormas/categories: Organization count per category.
#[utoipa::path(
    get,
    path = "/v1/ormas/categories",
    params(DistrictQuery),
    responses(
        (status = 200, description = "Counts in first-appearance order", body = Vec<CategoryCount>),
    ),
    tag = "ormas"
)]
async fn ormas_categories(
    State(state): State<AppState>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, AppError> {
    let filter = extract_filter(query)?;
    let records: Vec<OrmasRecord> = records::list(&state, filter);
    Ok(Json(group_by_category(&records)))
}
