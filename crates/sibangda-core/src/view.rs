//! # View Router
//!
//! Maps the selected view onto the slice of state it consumes. Unknown view
//! names fall back to the dashboard.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::aggregate::{conflict_rollup, handling_rollup, ConflictRollup, HandlingRollup};
use crate::collection::filter_by_district;
use crate::dashboard::DashboardSnapshot;
use crate::district::{District, DistrictFilter};
use crate::error::ValidationError;
use crate::image::DataUrl;
use crate::record::{
    ConflictHandlingRecord, ConflictRecord, ForeignerRecord, OrmasRecord, SUGGESTED_CATEGORIES,
};
use crate::snapshot::{MapKind, Snapshot};

/// The six top-level views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum View {
    #[default]
    Dashboard,
    Map,
    Handling,
    Ormas,
    Wasnas,
    Input,
}

impl View {
    pub const ALL: [View; 6] = [
        Self::Dashboard,
        Self::Map,
        Self::Handling,
        Self::Ormas,
        Self::Wasnas,
        Self::Input,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Map => "map",
            Self::Handling => "handling",
            Self::Ormas => "ormas",
            Self::Wasnas => "wasnas",
            Self::Input => "input",
        }
    }

    /// Header title shown above the view.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard SIBANGDA",
            Self::Map => "Peta Potensi Konflik",
            Self::Handling => "Status Penanganan Konflik",
            Self::Ormas => "Data Sebaran Ormas",
            Self::Wasnas => "Data Sebaran Wasnas",
            Self::Input => "Update Data Lapangan",
        }
    }

    /// Resolve a view name, falling back to [`View::Dashboard`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownView(s.to_string()))
    }
}

/// State consumed by the conflict-potential map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub records: Vec<ConflictRecord>,
    pub markers: Vec<ConflictRollup>,
    pub background: Option<DataUrl>,
}

/// State consumed by the handling map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlingView {
    pub records: Vec<ConflictHandlingRecord>,
    pub markers: Vec<HandlingRollup>,
    pub background: Option<DataUrl>,
}

/// State consumed by the data-entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputView {
    pub conflicts: Vec<ConflictRecord>,
    pub handling: Vec<ConflictHandlingRecord>,
    pub foreigners: Vec<ForeignerRecord>,
    pub ormas: Vec<OrmasRecord>,
    pub districts: Vec<District>,
    pub categories: Vec<String>,
}

/// Content of one routed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum ViewContent {
    Dashboard(DashboardSnapshot),
    Map(MapView),
    Handling(HandlingView),
    Ormas(Vec<OrmasRecord>),
    Wasnas(Vec<ForeignerRecord>),
    Input(Box<InputView>),
}

/// A routed view: title plus content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub title: String,
    #[serde(flatten)]
    pub content: ViewContent,
}

/// Select the state slice for `view`.
///
/// The district filter scopes the dashboard, the maps and the two tables.
/// The data-entry form always sees every record.
pub fn route(snapshot: &Snapshot, view: View, filter: DistrictFilter) -> ViewModel {
    let content = match view {
        View::Dashboard => ViewContent::Dashboard(DashboardSnapshot::compute(snapshot, filter)),
        View::Map => {
            let records = filter_by_district(&snapshot.conflicts, filter);
            ViewContent::Map(MapView {
                markers: conflict_rollup(&records),
                records,
                background: snapshot.map_background(MapKind::Conflict).cloned(),
            })
        }
        View::Handling => {
            let records = filter_by_district(&snapshot.handling, filter);
            ViewContent::Handling(HandlingView {
                markers: handling_rollup(&records),
                records,
                background: snapshot.map_background(MapKind::Handling).cloned(),
            })
        }
        View::Ormas => ViewContent::Ormas(filter_by_district(&snapshot.ormas, filter)),
        View::Wasnas => ViewContent::Wasnas(filter_by_district(&snapshot.foreigners, filter)),
        View::Input => ViewContent::Input(Box::new(InputView {
            conflicts: snapshot.conflicts.clone(),
            handling: snapshot.handling.clone(),
            foreigners: snapshot.foreigners.clone(),
            ormas: snapshot.ormas.clone(),
            districts: District::ALL.to_vec(),
            categories: SUGGESTED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        })),
    };
    ViewModel {
        title: view.title().to_string(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_view_falls_back_to_dashboard() {
        assert_eq!(View::from_name("settings"), View::Dashboard);
        assert_eq!(View::from_name("wasnas"), View::Wasnas);
        assert!(matches!(
            "settings".parse::<View>(),
            Err(ValidationError::UnknownView(_))
        ));
    }

    #[test]
    fn titles_are_indonesian_headers() {
        assert_eq!(View::Map.title(), "Peta Potensi Konflik");
        assert_eq!(View::Input.title(), "Update Data Lapangan");
        assert_eq!(View::default().title(), "Dashboard SIBANGDA");
    }

    #[test]
    fn map_view_is_filtered_and_carries_markers() {
        let snapshot = Snapshot::seeded();
        let model = route(&snapshot, View::Map, DistrictFilter::Only(District::Dompu));
        match model.content {
            ViewContent::Map(map) => {
                assert_eq!(map.records.len(), 1);
                assert_eq!(map.markers.len(), 1);
                assert!(map.background.is_none());
            }
            other => panic!("expected map view, got {other:?}"),
        }
    }

    #[test]
    fn input_view_ignores_filter() {
        let snapshot = Snapshot::seeded();
        let model = route(&snapshot, View::Input, DistrictFilter::Only(District::Bima));
        match model.content {
            ViewContent::Input(input) => {
                assert_eq!(input.conflicts.len(), 10);
                assert_eq!(input.districts.len(), 10);
                assert_eq!(input.categories.len(), 5);
            }
            other => panic!("expected input view, got {other:?}"),
        }
    }

    #[test]
    fn view_model_serializes_with_tag() {
        let snapshot = Snapshot::seeded();
        let model = route(&snapshot, View::Ormas, DistrictFilter::All);
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["title"], "Data Sebaran Ormas");
        assert_eq!(value["view"], "ormas");
        assert_eq!(value["data"].as_array().unwrap().len(), 5);
    }
}
