//! # Record Types
//!
//! The four entity kinds held by the dashboard, plus the detail sub-records
//! attached to conflict and handling entries.
//!
//! JSON uses camelCase field names. Optional fields are omitted when absent
//! and detail/media sequences are omitted when empty, so a seed record
//! without sub-incidents serializes exactly like its source literal.
//!
//! ## Identifiers
//!
//! Every record carries an opaque [`RecordId`]. A submission that omits
//! `id` receives a freshly generated UUID during deserialization, so the
//! upsert path never sees an absent identifier. An explicitly empty id is
//! rejected.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::district::District;
use crate::error::ValidationError;

/// Maximum length of free-text description fields.
pub const MAX_TEXT_LEN: usize = 2000;

/// Maximum length of short text fields (names, locations, times).
pub const MAX_SHORT_TEXT_LEN: usize = 255;

/// Category options offered by the registration form. Aggregation treats
/// categories as open strings; this list only seeds selectors.
pub const SUGGESTED_CATEGORIES: [&str; 5] =
    ["Sosial", "Keagamaan", "Kepemudaan", "Politik", "Ekonomi"];

// -- Identifiers --------------------------------------------------------------

/// Opaque, non-empty record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema), schema(value_type = String))]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing identifier. Rejects blank strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Identifier for built-in seed records. Callers guarantee non-empty text.
    pub(crate) fn from_seed(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// -- Enumerations -------------------------------------------------------------

/// Which of the four collections a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RecordKind {
    /// Potential social conflict (potensi konflik).
    Conflict,
    /// Conflict handling progress (penanganan konflik).
    Handling,
    /// Foreign nationals and institutions (Wasnas).
    Foreigner,
    /// Civic organization (Ormas).
    Ormas,
}

impl RecordKind {
    /// Return the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Handling => "handling",
            Self::Foreigner => "foreigner",
            Self::Ormas => "ormas",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity classification of a potential conflict.
///
/// `Ord` follows severity: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ConflictLevel {
    Low,
    Medium,
    High,
}

impl ConflictLevel {
    /// All levels, least severe first.
    pub const ALL: [ConflictLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Return the string representation of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for ConflictLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(ValidationError::UnknownLevel(other.to_string())),
        }
    }
}

/// Lifecycle state of a conflict-handling record.
///
/// `Ord` follows severity precedence: `Resolved < InProgress < Pending`.
/// Aggregation over a district takes the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum HandlingStatus {
    #[serde(rename = "Resolved")]
    Resolved,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending")]
    Pending,
}

impl HandlingStatus {
    /// All statuses, least severe first.
    pub const ALL: [HandlingStatus; 3] = [Self::Resolved, Self::InProgress, Self::Pending];

    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved => "Resolved",
            Self::InProgress => "In Progress",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for HandlingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Resolved" => Ok(Self::Resolved),
            "In Progress" => Ok(Self::InProgress),
            "Pending" => Ok(Self::Pending),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Registration status of a civic organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OrmasStatus {
    Active,
    Inactive,
}

impl OrmasStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for OrmasStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form organization category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema), schema(value_type = String))]
pub struct Category(String);

impl Category {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// -- Detail sub-records -------------------------------------------------------

/// A single sub-incident within a district's conflict record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IncidentDetail {
    pub location: String,
    pub time: String,
    pub description: String,
    pub remarks: String,
}

/// A single handled case within a district's handling record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseDetail {
    pub location: String,
    pub time: String,
    pub description: String,
    pub action: String,
    pub remarks: String,
}

// -- Records ------------------------------------------------------------------

/// Potential social conflict in a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConflictRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub district: District,
    pub level: ConflictLevel,
    pub incidents: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<IncidentDetail>,
}

/// Conflict-handling progress in a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConflictHandlingRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub district: District,
    pub status: HandlingStatus,
    pub cases: u32,
    pub last_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CaseDetail>,
}

/// Foreign nationals and institutions under monitoring in a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ForeignerRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub district: District,
    pub count: u32,
    pub institutions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_description: Option<String>,
}

/// Registered civic organization (Ormas).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OrmasRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub category: Category,
    pub district: District,
    pub status: OrmasStatus,
    pub member_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// -- Record trait -------------------------------------------------------------

/// Behaviour shared by the four record kinds.
///
/// Collection operations (upsert, remove, filter, grouping) are generic over
/// this trait.
pub trait Record: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Which collection this record belongs to.
    const KIND: RecordKind;

    /// The record's identifier.
    fn id(&self) -> &RecordId;

    /// Replace the record's identifier.
    fn set_id(&mut self, id: RecordId);

    /// District the record is filed under.
    fn district(&self) -> District;

    /// Business-rule validation beyond what the type system enforces.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

fn check_opt_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| check_len(field, v, max))
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

impl Record for ConflictRecord {
    const KIND: RecordKind = RecordKind::Conflict;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn district(&self) -> District {
        self.district
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_len("description", &self.description, MAX_TEXT_LEN)?;
        check_opt_len("locationDetail", self.location_detail.as_deref(), MAX_SHORT_TEXT_LEN)?;
        check_opt_len("incidentTime", self.incident_time.as_deref(), MAX_SHORT_TEXT_LEN)?;
        for detail in &self.details {
            check_non_empty("details.location", &detail.location)?;
            check_len("details.location", &detail.location, MAX_SHORT_TEXT_LEN)?;
            check_len("details.description", &detail.description, MAX_TEXT_LEN)?;
            check_len("details.remarks", &detail.remarks, MAX_TEXT_LEN)?;
        }
        Ok(())
    }
}

impl Record for ConflictHandlingRecord {
    const KIND: RecordKind = RecordKind::Handling;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn district(&self) -> District {
        self.district
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_len("lastAction", &self.last_action, MAX_TEXT_LEN)?;
        check_opt_len("locationDetail", self.location_detail.as_deref(), MAX_SHORT_TEXT_LEN)?;
        check_opt_len("incidentTime", self.incident_time.as_deref(), MAX_SHORT_TEXT_LEN)?;
        for detail in &self.details {
            check_non_empty("details.location", &detail.location)?;
            check_len("details.location", &detail.location, MAX_SHORT_TEXT_LEN)?;
            check_len("details.description", &detail.description, MAX_TEXT_LEN)?;
            check_len("details.action", &detail.action, MAX_TEXT_LEN)?;
            check_len("details.remarks", &detail.remarks, MAX_TEXT_LEN)?;
        }
        Ok(())
    }
}

impl Record for ForeignerRecord {
    const KIND: RecordKind = RecordKind::Foreigner;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn district(&self) -> District {
        self.district
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_opt_len("locationDetail", self.location_detail.as_deref(), MAX_SHORT_TEXT_LEN)?;
        check_opt_len(
            "activityDescription",
            self.activity_description.as_deref(),
            MAX_TEXT_LEN,
        )
    }
}

impl Record for OrmasRecord {
    const KIND: RecordKind = RecordKind::Ormas;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn district(&self) -> District {
        self.district
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_non_empty("name", &self.name)?;
        check_len("name", &self.name, MAX_SHORT_TEXT_LEN)?;
        check_non_empty("category", self.category.as_str())?;
        check_len("category", self.category.as_str(), MAX_SHORT_TEXT_LEN)?;
        check_opt_len("leaderName", self.leader_name.as_deref(), MAX_SHORT_TEXT_LEN)?;
        check_opt_len("address", self.address.as_deref(), MAX_TEXT_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_rejects_blank() {
        assert_eq!(RecordId::new(""), Err(ValidationError::EmptyId));
        assert_eq!(RecordId::new("   "), Err(ValidationError::EmptyId));
        assert_eq!(RecordId::new("x").unwrap().as_str(), "x");
    }

    #[test]
    fn generated_ids_are_distinct_uuids() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn missing_id_is_generated_on_deserialize() {
        let record: ForeignerRecord = serde_json::from_value(json!({
            "district": "Dompu",
            "count": 3,
            "institutions": 1
        }))
        .unwrap();
        assert!(!record.id.as_str().is_empty());
    }

    #[test]
    fn empty_id_is_rejected_on_deserialize() {
        let result: Result<ForeignerRecord, _> = serde_json::from_value(json!({
            "id": "",
            "district": "Dompu",
            "count": 3,
            "institutions": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn negative_or_non_numeric_counts_are_rejected() {
        let negative: Result<ConflictRecord, _> = serde_json::from_value(json!({
            "district": "Bima",
            "level": "High",
            "incidents": -1,
            "description": ""
        }));
        assert!(negative.is_err());

        let text: Result<ConflictRecord, _> = serde_json::from_value(json!({
            "district": "Bima",
            "level": "High",
            "incidents": "dua",
            "description": ""
        }));
        assert!(text.is_err());
    }

    #[test]
    fn handling_status_serializes_with_space() {
        let json = serde_json::to_string(&HandlingStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        assert_eq!(
            "In Progress".parse::<HandlingStatus>().unwrap(),
            HandlingStatus::InProgress
        );
    }

    #[test]
    fn severity_ordering() {
        assert!(HandlingStatus::Pending > HandlingStatus::InProgress);
        assert!(HandlingStatus::InProgress > HandlingStatus::Resolved);
        assert!(ConflictLevel::High > ConflictLevel::Medium);
        assert!(ConflictLevel::Medium > ConflictLevel::Low);
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let record = ConflictRecord {
            id: RecordId::new("c").unwrap(),
            district: District::Mataram,
            level: ConflictLevel::Low,
            incidents: 0,
            description: "Aman".to_string(),
            location_detail: None,
            incident_time: None,
            participants_count: None,
            image_url: None,
            details: vec![],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "c",
                "district": "Mataram",
                "level": "Low",
                "incidents": 0,
                "description": "Aman"
            })
        );
    }

    #[test]
    fn ormas_validation_requires_name() {
        let mut record = OrmasRecord {
            id: RecordId::new("1").unwrap(),
            name: "  ".to_string(),
            category: Category::new("Sosial"),
            district: District::Mataram,
            status: OrmasStatus::Active,
            member_count: 1,
            leader_name: None,
            address: None,
        };
        assert_eq!(
            record.validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );
        record.name = "Forum Warga".to_string();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn conflict_validation_rejects_blank_detail_location() {
        let record = ConflictRecord {
            id: RecordId::new("c").unwrap(),
            district: District::Mataram,
            level: ConflictLevel::Low,
            incidents: 1,
            description: String::new(),
            location_detail: None,
            incident_time: None,
            participants_count: None,
            image_url: None,
            details: vec![IncidentDetail {
                location: String::new(),
                time: "1 Mar 2024".to_string(),
                description: String::new(),
                remarks: String::new(),
            }],
        };
        assert_eq!(
            record.validate(),
            Err(ValidationError::EmptyField { field: "details.location" })
        );
    }

    #[test]
    fn text_limit_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_SHORT_TEXT_LEN);
        assert!(check_len("name", &long, MAX_SHORT_TEXT_LEN).is_ok());
        let longer = "é".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(check_len("name", &longer, MAX_SHORT_TEXT_LEN).is_err());
    }
}
