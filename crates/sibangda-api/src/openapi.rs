//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SIBANGDA API",
        version = "0.1.0",
        description = "Regional security monitoring dashboard for Nusa Tenggara Barat.\n\nProvides:\n- **Conflict potential** records with per-district map markers and location drill-down\n- **Conflict handling** progress with worst-status rollup and media gallery\n- **Foreigner monitoring** (Wasnas) counts per district\n- **Civic organizations** (Ormas) with category tally\n- **Dashboard** statistics under a district filter\n- **Map backgrounds** and the per-view state router\n\nHealth probes live under `/health/*`.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Conflicts ───────────────────────────────────────────────────
        crate::routes::conflicts::list_conflicts,
        crate::routes::conflicts::create_conflict,
        crate::routes::conflicts::get_conflict,
        crate::routes::conflicts::update_conflict,
        crate::routes::conflicts::delete_conflict,
        crate::routes::conflicts::rollup_conflicts,
        crate::routes::conflicts::drill_down_conflicts,
        crate::routes::conflicts::upload_conflict_image,
        // ── Handling ────────────────────────────────────────────────────
        crate::routes::handling::list_handling,
        crate::routes::handling::create_handling,
        crate::routes::handling::get_handling,
        crate::routes::handling::update_handling,
        crate::routes::handling::delete_handling,
        crate::routes::handling::rollup_handling,
        crate::routes::handling::drill_down_handling,
        crate::routes::handling::upload_handling_image,
        crate::routes::handling::append_handling_media,
        // ── Foreigners ──────────────────────────────────────────────────
        crate::routes::foreigners::list_foreigners,
        crate::routes::foreigners::create_foreigner,
        crate::routes::foreigners::get_foreigner,
        crate::routes::foreigners::update_foreigner,
        crate::routes::foreigners::delete_foreigner,
        // ── Ormas ───────────────────────────────────────────────────────
        crate::routes::ormas::list_ormas,
        crate::routes::ormas::create_ormas,
        crate::routes::ormas::get_ormas,
        crate::routes::ormas::update_ormas,
        crate::routes::ormas::delete_ormas,
        crate::routes::ormas::ormas_categories,
        // ── Dashboard ───────────────────────────────────────────────────
        crate::routes::dashboard::list_districts,
        crate::routes::dashboard::get_dashboard,
        crate::routes::dashboard::get_snapshot,
        // ── Maps ────────────────────────────────────────────────────────
        crate::routes::maps::get_background,
        crate::routes::maps::set_background,
        crate::routes::maps::clear_background,
        // ── Views ───────────────────────────────────────────────────────
        crate::routes::views::list_views,
        crate::routes::views::get_view,
    ),
    components(
        schemas(
            // ── Records ─────────────────────────────────────────────────
            sibangda_core::ConflictRecord,
            sibangda_core::ConflictHandlingRecord,
            sibangda_core::ForeignerRecord,
            sibangda_core::OrmasRecord,
            sibangda_core::IncidentDetail,
            sibangda_core::CaseDetail,
            sibangda_core::RecordId,
            sibangda_core::Category,
            sibangda_core::District,
            sibangda_core::ConflictLevel,
            sibangda_core::HandlingStatus,
            sibangda_core::OrmasStatus,
            sibangda_core::RecordKind,
            // ── Aggregates ──────────────────────────────────────────────
            sibangda_core::ConflictRollup,
            sibangda_core::HandlingRollup,
            sibangda_core::CategoryCount,
            sibangda_core::LocationPoint,
            sibangda_core::DashboardSnapshot,
            sibangda_core::DashboardStats,
            sibangda_core::dashboard::IncidentBar,
            sibangda_core::dashboard::ForeignerBar,
            sibangda_core::MapKind,
            sibangda_core::View,
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Route DTOs ──────────────────────────────────────────────
            crate::routes::records::DeleteResponse,
            crate::routes::dashboard::SnapshotResponse,
            crate::routes::maps::MapBackgroundResponse,
            crate::routes::views::ViewSummary,
            crate::state::Revision,
        ),
    ),
    tags(
        (name = "conflicts", description = "Conflict potential records, map markers, drill-down and scene images"),
        (name = "handling", description = "Conflict handling progress, status rollup, drill-down and media gallery"),
        (name = "foreigners", description = "Foreign national and institution monitoring (Wasnas)"),
        (name = "ormas", description = "Registered civic organizations and category tally"),
        (name = "dashboard", description = "District list, overview statistics and snapshot export"),
        (name = "maps", description = "Custom map backgrounds"),
        (name = "views", description = "Per-view state slices for the dashboard shell"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "SIBANGDA API");
        assert!(!spec.paths.paths.is_empty());
    }

    #[test]
    fn openapi_spec_has_record_paths() {
        let spec = ApiDoc::openapi();
        for path in [
            "/v1/conflicts",
            "/v1/handling/{id}/media",
            "/v1/ormas/categories",
            "/v1/maps/{map}/background",
            "/v1/views/{view}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn openapi_spec_has_record_schemas() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("components present");
        assert!(components.schemas.contains_key("ConflictRecord"));
        assert!(components.schemas.contains_key("ErrorBody"));
    }
}
