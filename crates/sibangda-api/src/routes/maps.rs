//! # Map Background API
//!
//! Each of the two maps (`conflict`, `handling`) can carry a custom
//! background image in place of the default base map. Uploads are raw
//! image bodies and are stored as data URLs.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sibangda_core::{DataUrl, MapKind};
use utoipa::ToSchema;

use super::records;
use crate::error::AppError;
use crate::state::AppState;

/// Current background of one map.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MapBackgroundResponse {
    pub map: MapKind,
    /// `true` when a custom background is set.
    pub custom: bool,
    /// MIME type of the custom background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Decoded image size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// The background as a data URL.
    #[serde(rename = "dataUrl", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub data_url: Option<DataUrl>,
}

impl MapBackgroundResponse {
    fn new(map: MapKind, background: Option<&DataUrl>) -> Self {
        Self {
            map,
            custom: background.is_some(),
            mime: background.map(|b| b.mime().to_string()),
            bytes: background.map(DataUrl::decoded_len),
            data_url: background.cloned(),
        }
    }
}

/// Build the maps router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/maps/:map/background",
        get(get_background)
            .put(set_background)
            .delete(clear_background),
    )
}

fn parse_map(raw: &str) -> Result<MapKind, AppError> {
    raw.parse().map_err(AppError::NotFound)
}

/// GET /v1/maps/:map/background: Current background.
#[utoipa::path(
    get,
    path = "/v1/maps/{map}/background",
    params(("map" = MapKind, Path, description = "Map kind")),
    responses(
        (status = 200, description = "Background state", body = MapBackgroundResponse),
        (status = 404, description = "Unknown map", body = crate::error::ErrorBody),
    ),
    tag = "maps"
)]
async fn get_background(
    State(state): State<AppState>,
    Path(map): Path<String>,
) -> Result<Json<MapBackgroundResponse>, AppError> {
    let map = parse_map(&map)?;
    let snapshot = state.store.current();
    Ok(Json(MapBackgroundResponse::new(map, snapshot.map_background(map))))
}

/// PUT /v1/maps/:map/background: Replace the background image.
///
/// The request body is the raw image; `Content-Type` must be `image/*`.
#[utoipa::path(
    put,
    path = "/v1/maps/{map}/background",
    params(("map" = MapKind, Path, description = "Map kind")),
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 200, description = "Background set", body = MapBackgroundResponse),
        (status = 404, description = "Unknown map", body = crate::error::ErrorBody),
        (status = 413, description = "Image too large", body = crate::error::ErrorBody),
        (status = 415, description = "Not an image", body = crate::error::ErrorBody),
    ),
    tag = "maps"
)]
async fn set_background(
    State(state): State<AppState>,
    Path(map): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MapBackgroundResponse>, AppError> {
    let map = parse_map(&map)?;
    let image = records::read_image(&state, &headers, body)?;
    let response = MapBackgroundResponse::new(map, Some(&image));
    state
        .store
        .update(|snapshot| Ok::<_, AppError>((snapshot.set_map_background(map, image), ())))?;
    tracing::info!(map = %map, mime = response.mime.as_deref(), "map background replaced");
    Ok(Json(response))
}

/// DELETE /v1/maps/:map/background: Revert to the default base map.
#[utoipa::path(
    delete,
    path = "/v1/maps/{map}/background",
    params(("map" = MapKind, Path, description = "Map kind")),
    responses(
        (status = 200, description = "Background cleared", body = MapBackgroundResponse),
        (status = 404, description = "Unknown map", body = crate::error::ErrorBody),
    ),
    tag = "maps"
)]
async fn clear_background(
    State(state): State<AppState>,
    Path(map): Path<String>,
) -> Result<Json<MapBackgroundResponse>, AppError> {
    let map = parse_map(&map)?;
    state
        .store
        .update(|snapshot| Ok::<_, AppError>((snapshot.clear_map_background(map), ())))?;
    tracing::info!(map = %map, "map background cleared");
    Ok(Json(MapBackgroundResponse::new(map, None)))
}
