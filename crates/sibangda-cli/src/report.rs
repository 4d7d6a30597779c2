//! # Report Subcommands
//!
//! Read-only reports over a snapshot: district list, dashboard statistics,
//! map rollups, category tally and location drill-down.

use anyhow::Result;
use clap::{Args, ValueEnum};

use sibangda_core::{
    conflict_rollup, drill_down, filter_by_district, group_by_category, handling_rollup,
    DashboardSnapshot, District, LocationPoint, Snapshot,
};

use crate::{emit, parse_filter, OutputFormat};

/// Which map a rollup or drill-down reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapArg {
    /// Conflict-potential records (incidents).
    Conflict,
    /// Conflict-handling records (cases).
    Handling,
}

/// Arguments for `sibangda dashboard`.
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// District display name; omit or pass "Semua Wilayah" for all.
    #[arg(long)]
    pub district: Option<String>,
}

/// Arguments for `sibangda rollup`.
#[derive(Args, Debug)]
pub struct RollupArgs {
    /// Map to roll up.
    #[arg(value_enum)]
    pub map: MapArg,

    /// District display name; omit for all.
    #[arg(long)]
    pub district: Option<String>,
}

/// Arguments for `sibangda categories`.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// District display name; omit for all.
    #[arg(long)]
    pub district: Option<String>,
}

/// Arguments for `sibangda drill-down`.
#[derive(Args, Debug)]
pub struct DrillDownArgs {
    /// Map to drill into.
    #[arg(value_enum)]
    pub map: MapArg,

    /// District display name, e.g. "Lombok Tengah".
    pub district: District,
}

/// Print the ten districts in canonical order.
pub fn run_districts(format: OutputFormat) -> Result<u8> {
    emit(&District::names(), format)?;
    Ok(0)
}

/// Print the dashboard overview.
pub fn run_dashboard(args: &DashboardArgs, snapshot: &Snapshot, format: OutputFormat) -> Result<u8> {
    let filter = parse_filter(args.district.as_deref())?;
    emit(&DashboardSnapshot::compute(snapshot, filter), format)?;
    Ok(0)
}

/// Print one marker per district for the chosen map.
pub fn run_rollup(args: &RollupArgs, snapshot: &Snapshot, format: OutputFormat) -> Result<u8> {
    let filter = parse_filter(args.district.as_deref())?;
    match args.map {
        MapArg::Conflict => {
            let records = filter_by_district(&snapshot.conflicts, filter);
            emit(&conflict_rollup(&records), format)?;
        }
        MapArg::Handling => {
            let records = filter_by_district(&snapshot.handling, filter);
            emit(&handling_rollup(&records), format)?;
        }
    }
    Ok(0)
}

/// Print the organization count per category.
pub fn run_categories(args: &CategoriesArgs, snapshot: &Snapshot, format: OutputFormat) -> Result<u8> {
    let filter = parse_filter(args.district.as_deref())?;
    let ormas = filter_by_district(&snapshot.ormas, filter);
    emit(&group_by_category(&ormas), format)?;
    Ok(0)
}

/// Per-location points for a district on the chosen map.
pub fn drill_down_points(map: MapArg, district: District, snapshot: &Snapshot) -> Vec<LocationPoint> {
    match map {
        MapArg::Conflict => drill_down(&snapshot.conflicts, district),
        MapArg::Handling => drill_down(&snapshot.handling, district),
    }
}

/// Print the drill-down for a district. Exits 1 when the district has no
/// records on that map.
pub fn run_drill_down(args: &DrillDownArgs, snapshot: &Snapshot, format: OutputFormat) -> Result<u8> {
    let points = drill_down_points(args.map, args.district, snapshot);
    if points.is_empty() {
        tracing::warn!(district = %args.district, map = ?args.map, "no records in district");
        println!("NOT FOUND: no {:?} records in {}", args.map, args.district);
        return Ok(1);
    }
    emit(&points, format)?;
    Ok(0)
}
