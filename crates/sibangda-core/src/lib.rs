//! # sibangda-core: Data Core for the SIBANGDA Dashboard
//!
//! In-memory state of the provincial monitoring dashboard of
//! Bakesbangpoldagri NTB. It covers potential social conflicts, conflict
//! handling progress, foreign nationals and institutions (Wasnas), and
//! registered civic organizations (Ormas).
//!
//! ## Key Design Principles
//!
//! 1. **One district enumeration.** [`District`] is the only definition of
//!    the ten administrative units. Its declaration order is the display
//!    order and every selector and grouping follows it.
//!
//! 2. **Total collection operations.** Upsert, remove and district filtering
//!    never fail. They borrow a collection and return a new one.
//!
//! 3. **Single-owner state.** [`Snapshot`] holds everything. Updates return
//!    a new snapshot that the holder swaps in.
//!
//! 4. **Typed numerics.** Counts are `u32`. Negative or non-numeric input
//!    fails at deserialization instead of reaching aggregation.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - `openapi` feature derives `utoipa::ToSchema` for the HTTP surface.

pub mod aggregate;
pub mod collection;
pub mod dashboard;
pub mod district;
pub mod error;
pub mod image;
pub mod record;
pub mod seed;
pub mod snapshot;
pub mod view;

// Re-export primary types for ergonomic imports.
pub use aggregate::{
    aggregate_level, aggregate_status, conflict_rollup, drill_down, group_by_category,
    group_by_district, handling_rollup, CategoryCount, ConflictRollup, Drillable, HandlingRollup,
    LocationPoint,
};
pub use collection::{filter_by_district, remove, upsert, UpsertOutcome};
pub use dashboard::{DashboardSnapshot, DashboardStats};
pub use district::{District, DistrictFilter, ALL_DISTRICTS_LABEL, DISTRICT_COUNT};
pub use error::{ImageError, SibangdaError, ValidationError};
pub use image::{DataUrl, DEFAULT_MAX_IMAGE_BYTES};
pub use record::{
    CaseDetail, Category, ConflictHandlingRecord, ConflictLevel, ConflictRecord, ForeignerRecord,
    HandlingStatus, IncidentDetail, OrmasRecord, OrmasStatus, Record, RecordId, RecordKind,
    SUGGESTED_CATEGORIES,
};
pub use snapshot::{Confirmation, ImageTarget, MapKind, Removal, Snapshot, StoredRecord};
pub use view::{route, View, ViewContent, ViewModel};
