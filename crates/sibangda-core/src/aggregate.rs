//! # Grouping and Aggregation
//!
//! Derives per-district and per-category views from raw collections for map
//! markers, charts and tables.
//!
//! ## Severity precedence
//!
//! Several handling records can share a district. They collapse into a single
//! marker whose status is the most severe one present:
//! Pending, then In Progress, then Resolved. Conflict levels roll up the same
//! way (High, then Medium, then Low). Both enums derive `Ord` in severity
//! order, so the rollup is a plain maximum.
//!
//! ## Drill-down
//!
//! For one selected district, sub-incidents (or handled cases) are grouped
//! by location and counted. A district without any detail sub-records falls
//! back to a single point carrying its aggregate count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::district::District;
use crate::record::{
    Category, ConflictHandlingRecord, ConflictLevel, ConflictRecord, HandlingStatus, OrmasRecord,
    Record,
};

/// Group records by district.
///
/// Keys iterate in canonical district order. Within each group, records keep
/// their input order. Every input record appears in exactly one group.
pub fn group_by_district<T: Record>(collection: &[T]) -> BTreeMap<District, Vec<T>> {
    let mut groups: BTreeMap<District, Vec<T>> = BTreeMap::new();
    for record in collection {
        groups
            .entry(record.district())
            .or_default()
            .push(record.clone());
    }
    groups
}

/// Most severe handling status in `statuses`; `Resolved` when empty.
pub fn aggregate_status<I>(statuses: I) -> HandlingStatus
where
    I: IntoIterator<Item = HandlingStatus>,
{
    statuses
        .into_iter()
        .max()
        .unwrap_or(HandlingStatus::Resolved)
}

/// Most severe conflict level in `levels`; `Low` when empty.
pub fn aggregate_level<I>(levels: I) -> ConflictLevel
where
    I: IntoIterator<Item = ConflictLevel>,
{
    levels.into_iter().max().unwrap_or(ConflictLevel::Low)
}

/// One map marker for a district on the handling map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HandlingRollup {
    pub district: District,
    pub status: HandlingStatus,
    pub total_cases: u32,
    pub record_count: usize,
    /// Most recent action text of the first record in the group.
    pub last_action: String,
}

/// One map marker for a district on the conflict-potential map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConflictRollup {
    pub district: District,
    pub level: ConflictLevel,
    pub total_incidents: u32,
    pub record_count: usize,
}

/// Roll handling records up into one marker per district.
pub fn handling_rollup(collection: &[ConflictHandlingRecord]) -> Vec<HandlingRollup> {
    group_by_district(collection)
        .into_iter()
        .map(|(district, records)| HandlingRollup {
            district,
            status: aggregate_status(records.iter().map(|r| r.status)),
            total_cases: records.iter().fold(0u32, |acc, r| acc.saturating_add(r.cases)),
            record_count: records.len(),
            last_action: records
                .first()
                .map(|r| r.last_action.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Roll conflict records up into one marker per district.
pub fn conflict_rollup(collection: &[ConflictRecord]) -> Vec<ConflictRollup> {
    group_by_district(collection)
        .into_iter()
        .map(|(district, records)| ConflictRollup {
            district,
            level: aggregate_level(records.iter().map(|r| r.level)),
            total_incidents: records
                .iter()
                .fold(0u32, |acc, r| acc.saturating_add(r.incidents)),
            record_count: records.len(),
        })
        .collect()
}

/// Number of organizations sharing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CategoryCount {
    pub name: Category,
    pub value: usize,
}

/// Tally organizations by category, in first-appearance order.
///
/// Categories are open strings; whatever appears in the data is counted.
pub fn group_by_category(collection: &[OrmasRecord]) -> Vec<CategoryCount> {
    let mut tally: Vec<CategoryCount> = Vec::new();
    for record in collection {
        match tally.iter_mut().find(|c| c.name == record.category) {
            Some(existing) => existing.value += 1,
            None => tally.push(CategoryCount {
                name: record.category.clone(),
                value: 1,
            }),
        }
    }
    tally
}

/// Count of sub-records at one location within a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LocationPoint {
    pub location: String,
    pub count: u32,
}

/// Records that carry location-tagged detail sub-records.
pub trait Drillable: Record {
    /// Locations of this record's detail sub-records, in order.
    fn detail_locations(&self) -> Vec<&str>;

    /// Aggregate count used when no details exist (incidents or cases).
    fn headline_count(&self) -> u32;
}

impl Drillable for ConflictRecord {
    fn detail_locations(&self) -> Vec<&str> {
        self.details.iter().map(|d| d.location.as_str()).collect()
    }

    fn headline_count(&self) -> u32 {
        self.incidents
    }
}

impl Drillable for ConflictHandlingRecord {
    fn detail_locations(&self) -> Vec<&str> {
        self.details.iter().map(|d| d.location.as_str()).collect()
    }

    fn headline_count(&self) -> u32 {
        self.cases
    }
}

/// Drill down into one district.
///
/// When any of the district's records has detail sub-records, they are
/// grouped by location and counted in first-appearance order. Otherwise a
/// single point labelled with the district name carries the summed
/// headline count. A district with no records yields no points.
pub fn drill_down<T: Drillable>(collection: &[T], district: District) -> Vec<LocationPoint> {
    let records: Vec<&T> = collection
        .iter()
        .filter(|r| r.district() == district)
        .collect();
    if records.is_empty() {
        return Vec::new();
    }

    let locations: Vec<&str> = records
        .iter()
        .flat_map(|r| r.detail_locations())
        .collect();

    if locations.is_empty() {
        let total = records
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.headline_count()));
        return vec![LocationPoint {
            location: district.as_str().to_string(),
            count: total,
        }];
    }

    let mut points: Vec<LocationPoint> = Vec::new();
    for location in locations {
        match points.iter_mut().find(|p| p.location == location) {
            Some(point) => point.count = point.count.saturating_add(1),
            None => points.push(LocationPoint {
                location: location.to_string(),
                count: 1,
            }),
        }
    }
    points
}
