//! # View Routing API
//!
//! Serves the state slice each dashboard view renders. Unknown view names
//! resolve to the dashboard overview, matching the shell's navigation.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sibangda_core::{route, View, ViewModel};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_filter, DistrictQuery};
use crate::state::AppState;

/// Navigation entry for one view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ViewSummary {
    pub view: View,
    pub title: String,
}

/// Build the views router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/views", get(list_views))
        .route("/v1/views/:view", get(get_view))
}

/// GET /v1/views: Navigation entries in menu order.
#[utoipa::path(
    get,
    path = "/v1/views",
    responses(
        (status = 200, description = "Views with their header titles", body = Vec<ViewSummary>),
    ),
    tag = "views"
)]
async fn list_views() -> Json<Vec<ViewSummary>> {
    Json(
        View::ALL
            .iter()
            .map(|view| ViewSummary {
                view: *view,
                title: view.title().to_string(),
            })
            .collect(),
    )
}

/// GET /v1/views/:view: State slice for one view.
///
/// The body is `{"title", "view", "data"}` where `data` depends on `view`.
#[utoipa::path(
    get,
    path = "/v1/views/{view}",
    params(("view" = String, Path, description = "View name"), DistrictQuery),
    responses(
        (status = 200, description = "Routed view model"),
        (status = 400, description = "Unknown district", body = crate::error::ErrorBody),
    ),
    tag = "views"
)]
async fn get_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<ViewModel>, AppError> {
    let filter = extract_filter(query)?;
    let view = View::from_name(&name);
    tracing::debug!(requested = %name, view = %view, filter = %filter, "view routed");
    let snapshot = state.store.current();
    Ok(Json(route(&snapshot, view, filter)))
}
