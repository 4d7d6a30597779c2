//! # Districts
//!
//! Defines the `District` enum covering the ten administrative units
//! (kabupaten/kota) of Nusa Tenggara Barat. This is the ONE definition used
//! by every record type, selector and aggregation. Declaration order is the
//! canonical display order, and the derived `Ord` follows it, so any
//! `BTreeMap<District, _>` iterates districts in the order the dashboard
//! shows them.
//!
//! [`DistrictFilter`] models the dashboard scope selector: either every
//! district (sentinel text `"Semua Wilayah"`) or exactly one.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of districts. Used for compile-time sized tables.
pub const DISTRICT_COUNT: usize = 10;

/// Sentinel text for the "all districts" dashboard scope.
pub const ALL_DISTRICTS_LABEL: &str = "Semua Wilayah";

/// One of the ten administrative units of the province.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum District {
    #[serde(rename = "Mataram")]
    Mataram,
    #[serde(rename = "Lombok Barat")]
    LombokBarat,
    #[serde(rename = "Lombok Tengah")]
    LombokTengah,
    #[serde(rename = "Lombok Timur")]
    LombokTimur,
    #[serde(rename = "Lombok Utara")]
    LombokUtara,
    #[serde(rename = "Sumbawa Barat")]
    SumbawaBarat,
    #[serde(rename = "Sumbawa")]
    Sumbawa,
    #[serde(rename = "Dompu")]
    Dompu,
    #[serde(rename = "Bima")]
    Bima,
    #[serde(rename = "Kota Bima")]
    KotaBima,
}

impl District {
    /// All districts in canonical order. Every district selector is
    /// populated from this list.
    pub const ALL: [District; DISTRICT_COUNT] = [
        Self::Mataram,
        Self::LombokBarat,
        Self::LombokTengah,
        Self::LombokTimur,
        Self::LombokUtara,
        Self::SumbawaBarat,
        Self::Sumbawa,
        Self::Dompu,
        Self::Bima,
        Self::KotaBima,
    ];

    /// Display name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mataram => "Mataram",
            Self::LombokBarat => "Lombok Barat",
            Self::LombokTengah => "Lombok Tengah",
            Self::LombokTimur => "Lombok Timur",
            Self::LombokUtara => "Lombok Utara",
            Self::SumbawaBarat => "Sumbawa Barat",
            Self::Sumbawa => "Sumbawa",
            Self::Dompu => "Dompu",
            Self::Bima => "Bima",
            Self::KotaBima => "Kota Bima",
        }
    }

    /// Display names in canonical order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(District::as_str).collect()
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for District {
    type Err = ValidationError;

    /// Parse a district from its display name. Matching is exact after
    /// trimming surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownDistrict(s.to_string()))
    }
}

/// Dashboard scope: every district, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistrictFilter {
    /// No filtering; the sentinel `"Semua Wilayah"`.
    #[default]
    All,
    /// Only records in the given district.
    Only(District),
}

impl DistrictFilter {
    /// Whether a record in `district` falls inside this scope.
    pub fn admits(&self, district: District) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == district,
        }
    }

    /// Build a filter from an optional query value. Absent or blank values
    /// mean every district.
    pub fn from_query(value: Option<&str>) -> Result<Self, ValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(s) => s.parse(),
        }
    }
}

impl std::fmt::Display for DistrictFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_DISTRICTS_LABEL),
            Self::Only(d) => f.write_str(d.as_str()),
        }
    }
}

impl FromStr for DistrictFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == ALL_DISTRICTS_LABEL {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl TryFrom<String> for DistrictFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DistrictFilter> for String {
    fn from(filter: DistrictFilter) -> Self {
        filter.to_string()
    }
}

impl From<District> for DistrictFilter {
    fn from(district: District) -> Self {
        Self::Only(district)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_selector_list() {
        assert_eq!(
            District::names(),
            vec![
                "Mataram",
                "Lombok Barat",
                "Lombok Tengah",
                "Lombok Timur",
                "Lombok Utara",
                "Sumbawa Barat",
                "Sumbawa",
                "Dompu",
                "Bima",
                "Kota Bima",
            ]
        );
    }

    #[test]
    fn ord_follows_declaration_order() {
        let mut shuffled = vec![District::KotaBima, District::Mataram, District::Dompu];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![District::Mataram, District::Dompu, District::KotaBima]
        );
    }

    #[test]
    fn parse_roundtrips_every_district() {
        for d in District::ALL {
            assert_eq!(d.as_str().parse::<District>().unwrap(), d);
        }
    }

    #[test]
    fn parse_is_case_sensitive_and_rejects_unknown() {
        assert!("bima".parse::<District>().is_err());
        assert!("Jakarta".parse::<District>().is_err());
        assert!("".parse::<District>().is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&District::LombokTengah).unwrap();
        assert_eq!(json, "\"Lombok Tengah\"");
        let back: District = serde_json::from_str("\"Kota Bima\"").unwrap();
        assert_eq!(back, District::KotaBima);
    }

    #[test]
    fn filter_sentinel_parses_to_all() {
        assert_eq!(
            "Semua Wilayah".parse::<DistrictFilter>().unwrap(),
            DistrictFilter::All
        );
        assert_eq!(
            "Bima".parse::<DistrictFilter>().unwrap(),
            DistrictFilter::Only(District::Bima)
        );
    }

    #[test]
    fn filter_from_query_defaults_to_all() {
        assert_eq!(DistrictFilter::from_query(None).unwrap(), DistrictFilter::All);
        assert_eq!(DistrictFilter::from_query(Some("  ")).unwrap(), DistrictFilter::All);
        assert!(DistrictFilter::from_query(Some("Atlantis")).is_err());
    }

    #[test]
    fn filter_admits() {
        assert!(DistrictFilter::All.admits(District::Dompu));
        let only = DistrictFilter::Only(District::Bima);
        assert!(only.admits(District::Bima));
        assert!(!only.admits(District::KotaBima));
    }

    #[test]
    fn filter_serde_uses_text_form() {
        let json = serde_json::to_string(&DistrictFilter::All).unwrap();
        assert_eq!(json, "\"Semua Wilayah\"");
        let parsed: DistrictFilter = serde_json::from_str("\"Dompu\"").unwrap();
        assert_eq!(parsed, DistrictFilter::Only(District::Dompu));
    }
}
