//! # API Route Modules
//!
//! - `conflicts`: conflict-potential records, map markers, drill-down and
//!   scene images.
//! - `handling`: handling-progress records, status rollup, drill-down and
//!   the media gallery.
//! - `foreigners`: foreign national monitoring (Wasnas).
//! - `ormas`: civic organizations and the category tally.
//! - `dashboard`: district list, overview statistics, snapshot export.
//! - `maps`: custom map backgrounds.
//! - `views`: per-view state slices for the dashboard shell.
//! - `records`: list/get/upsert/delete shared by the four collections.

pub mod conflicts;
pub mod dashboard;
pub mod foreigners;
pub mod handling;
pub mod maps;
pub mod ormas;
pub mod records;
pub mod views;

use axum::Router;

use crate::state::AppState;

/// All `/v1` routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(conflicts::router())
        .merge(handling::router())
        .merge(foreigners::router())
        .merge(ormas::router())
        .merge(dashboard::router())
        .merge(maps::router())
        .merge(views::router())
}
