//! # Shared Record Handlers
//!
//! Generic list/get/upsert/delete logic used by the four collection
//! routers. Each collection module wraps these in concrete, documented
//! handlers.
//!
//! Upsert answers 201 when a record was inserted and 200 when an existing
//! record was replaced in place. Delete is a no-op unless `?confirm=true`
//! is given, and removing an unknown id is not an error.
//!
//! Ids that collide with a static segment under `/v1/{kind}/` are refused
//! on write, since such a record could not be fetched or deleted by id.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use sibangda_core::{
    filter_by_district, Confirmation, DataUrl, DistrictFilter, ImageError, RecordId,
    StoredRecord, UpsertOutcome,
};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Delete confirmation query.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DeleteQuery {
    /// Must be `true` for the record to be removed.
    #[serde(default)]
    pub confirm: bool,
}

/// Outcome of a delete request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Whether the caller confirmed the removal.
    pub confirmed: bool,
    /// Number of records removed.
    pub removed: usize,
}

// ── Generic operations ──────────────────────────────────────────────

/// Static path segments routed alongside `/v1/{kind}/:id`.
pub(crate) const RESERVED_IDS: &[&str] = &["rollup", "drill-down", "categories"];

pub(crate) fn parse_id(raw: String) -> Result<RecordId, AppError> {
    Ok(RecordId::new(raw)?)
}

fn ensure_addressable(id: &RecordId) -> Result<(), AppError> {
    if RESERVED_IDS.contains(&id.as_str()) {
        return Err(AppError::BadRequest(format!(
            "record id {:?} is reserved",
            id.as_str()
        )));
    }
    Ok(())
}

pub(crate) fn list<T: StoredRecord>(state: &AppState, filter: DistrictFilter) -> Vec<T> {
    filter_by_district(state.store.current().records::<T>(), filter)
}

pub(crate) fn get<T: StoredRecord>(state: &AppState, raw_id: String) -> Result<T, AppError> {
    let id = parse_id(raw_id)?;
    state
        .store
        .current()
        .find::<T>(&id)
        .cloned()
        .ok_or_else(|| AppError::record_not_found(T::KIND.as_str(), id.as_str()))
}

pub(crate) fn upsert<T: StoredRecord>(
    state: &AppState,
    record: T,
) -> Result<(StatusCode, Json<T>), AppError> {
    ensure_addressable(record.id())?;
    let stored = record.clone();
    let outcome = state.store.update(|snapshot| snapshot.upsert(record))?;
    let status = match outcome {
        UpsertOutcome::Inserted => StatusCode::CREATED,
        UpsertOutcome::Replaced(_) => StatusCode::OK,
    };
    tracing::info!(
        kind = T::KIND.as_str(),
        id = %stored.id(),
        district = %stored.district(),
        ?outcome,
        "record saved"
    );
    Ok((status, Json(stored)))
}

pub(crate) fn upsert_at<T: StoredRecord>(
    state: &AppState,
    raw_id: String,
    mut record: T,
) -> Result<(StatusCode, Json<T>), AppError> {
    record.set_id(parse_id(raw_id)?);
    upsert(state, record)
}

pub(crate) fn delete<T: StoredRecord>(
    state: &AppState,
    raw_id: String,
    query: DeleteQuery,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id(raw_id)?;
    let confirmation = Confirmation::from(query.confirm);
    let removal = state
        .store
        .update(|snapshot| Ok::<_, AppError>(snapshot.remove::<T>(&id, confirmation)))?;
    if removal.confirmed {
        tracing::info!(kind = T::KIND.as_str(), id = %id, removed = removal.removed, "record deleted");
    }
    Ok(Json(DeleteResponse {
        confirmed: removal.confirmed,
        removed: removal.removed,
    }))
}

/// Encode an uploaded image body as a data URL.
///
/// Oversized bodies rejected by the body limit surface as 413 with the
/// standard error body.
pub(crate) fn read_image(
    state: &AppState,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<DataUrl, AppError> {
    let max = state.config.max_image_bytes;
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::from(ImageError::TooLarge { size: max + 1, max })
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Ok(DataUrl::encode(content_type, &bytes, max)?)
}
