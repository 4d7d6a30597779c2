//! # Dashboard Statistics
//!
//! Headline figures and chart series for the dashboard overview, computed
//! from a [`Snapshot`] under a [`DistrictFilter`]. The filter applies to the
//! conflict, ormas and foreigner collections alike.

use serde::{Deserialize, Serialize};

use crate::aggregate::{group_by_category, group_by_district, CategoryCount};
use crate::collection::filter_by_district;
use crate::district::{District, DistrictFilter};
use crate::record::{ConflictLevel, ConflictRecord, ForeignerRecord, OrmasRecord};
use crate::snapshot::Snapshot;

/// The four stat cards at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    /// Number of registered organizations.
    pub total_ormas: usize,
    /// Conflict records at level High.
    pub active_conflicts: usize,
    /// Sum of foreign nationals.
    pub total_foreigners: u64,
    /// Sum of foreign institutions.
    pub total_institutions: u64,
}

impl DashboardStats {
    pub fn compute(
        conflicts: &[ConflictRecord],
        ormas: &[OrmasRecord],
        foreigners: &[ForeignerRecord],
    ) -> Self {
        Self {
            total_ormas: ormas.len(),
            active_conflicts: conflicts
                .iter()
                .filter(|c| c.level == ConflictLevel::High)
                .count(),
            total_foreigners: foreigners.iter().map(|f| u64::from(f.count)).sum(),
            total_institutions: foreigners.iter().map(|f| u64::from(f.institutions)).sum(),
        }
    }
}

/// Bar of the incidents-per-district chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IncidentBar {
    pub district: District,
    pub incidents: u32,
}

/// Paired bars of the foreigner monitoring chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ForeignerBar {
    pub district: District,
    pub count: u32,
    pub institutions: u32,
}

/// Everything the dashboard overview renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardSnapshot {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub filter: DistrictFilter,
    pub stats: DashboardStats,
    pub incidents_by_district: Vec<IncidentBar>,
    pub ormas_by_category: Vec<CategoryCount>,
    pub foreigners_by_district: Vec<ForeignerBar>,
}

impl DashboardSnapshot {
    /// Compute the overview for the districts admitted by `filter`.
    pub fn compute(snapshot: &Snapshot, filter: DistrictFilter) -> Self {
        let conflicts = filter_by_district(&snapshot.conflicts, filter);
        let ormas = filter_by_district(&snapshot.ormas, filter);
        let foreigners = filter_by_district(&snapshot.foreigners, filter);

        let incidents_by_district = group_by_district(&conflicts)
            .into_iter()
            .map(|(district, records)| IncidentBar {
                district,
                incidents: records
                    .iter()
                    .fold(0u32, |acc, r| acc.saturating_add(r.incidents)),
            })
            .collect();

        let foreigners_by_district = group_by_district(&foreigners)
            .into_iter()
            .map(|(district, records)| ForeignerBar {
                district,
                count: records.iter().fold(0u32, |acc, r| acc.saturating_add(r.count)),
                institutions: records
                    .iter()
                    .fold(0u32, |acc, r| acc.saturating_add(r.institutions)),
            })
            .collect();

        Self {
            filter,
            stats: DashboardStats::compute(&conflicts, &ormas, &foreigners),
            incidents_by_district,
            ormas_by_category: group_by_category(&ormas),
            foreigners_by_district,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_stats_for_all_districts() {
        let snapshot = Snapshot::seeded();
        let overview = DashboardSnapshot::compute(&snapshot, DistrictFilter::All);
        assert_eq!(
            overview.stats,
            DashboardStats {
                total_ormas: 5,
                active_conflicts: 2,
                total_foreigners: 1810,
                total_institutions: 73,
            }
        );
        assert_eq!(overview.incidents_by_district.len(), 10);
        assert_eq!(overview.ormas_by_category.len(), 5);
        assert_eq!(overview.foreigners_by_district[4].count, 600);
    }

    #[test]
    fn filter_scopes_every_collection() {
        let snapshot = Snapshot::seeded();
        let overview = DashboardSnapshot::compute(&snapshot, DistrictFilter::Only(District::Bima));
        assert_eq!(overview.stats.total_ormas, 1);
        assert_eq!(overview.stats.active_conflicts, 1);
        assert_eq!(overview.stats.total_foreigners, 8);
        assert_eq!(overview.stats.total_institutions, 1);
        assert_eq!(
            overview.incidents_by_district,
            vec![IncidentBar { district: District::Bima, incidents: 12 }]
        );
        assert_eq!(overview.ormas_by_category[0].name, "Ekonomi");
    }

    #[test]
    fn district_without_records_yields_zeroes() {
        let snapshot = Snapshot::default();
        let overview = DashboardSnapshot::compute(&snapshot, DistrictFilter::Only(District::Dompu));
        assert_eq!(overview.stats, DashboardStats::default());
        assert!(overview.incidents_by_district.is_empty());
    }
}
