//! # Application Snapshot
//!
//! [`Snapshot`] is the single owner of dashboard state: the four record
//! collections plus the two transient custom map backgrounds. Every update
//! borrows the current snapshot and returns a new one. The holder (the API
//! state, or a CLI run) swaps it in, so each update is fully applied before
//! the next begins.
//!
//! Generic updates dispatch through [`StoredRecord`], which maps a record
//! type onto its collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::collection::{self, UpsertOutcome};
use crate::error::{SibangdaError, ValidationError};
use crate::image::DataUrl;
use crate::record::{
    ConflictHandlingRecord, ConflictRecord, ForeignerRecord, OrmasRecord, Record, RecordId,
};
use crate::seed;

/// Full dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub conflicts: Vec<ConflictRecord>,
    pub handling: Vec<ConflictHandlingRecord>,
    pub foreigners: Vec<ForeignerRecord>,
    pub ormas: Vec<OrmasRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_map_background: Option<DataUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handling_map_background: Option<DataUrl>,
}

/// Which of the two maps a background image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum MapKind {
    /// Conflict-potential map.
    Conflict,
    /// Conflict-handling map.
    Handling,
}

impl MapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Handling => "handling",
        }
    }
}

impl std::fmt::Display for MapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MapKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conflict" => Ok(Self::Conflict),
            "handling" => Ok(Self::Handling),
            other => Err(format!("unknown map kind: {other:?}")),
        }
    }
}

/// Explicit user confirmation for destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Result of [`Snapshot::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub confirmed: bool,
    pub removed: usize,
}

/// A record type stored in one of the snapshot's collections.
pub trait StoredRecord: Record {
    fn collection(snapshot: &Snapshot) -> &[Self];
    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;
}

impl StoredRecord for ConflictRecord {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.conflicts
    }
    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.conflicts
    }
}

impl StoredRecord for ConflictHandlingRecord {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.handling
    }
    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.handling
    }
}

impl StoredRecord for ForeignerRecord {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.foreigners
    }
    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.foreigners
    }
}

impl StoredRecord for OrmasRecord {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.ormas
    }
    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.ormas
    }
}

impl Snapshot {
    /// State at application start: the built-in seed collections and no
    /// custom map backgrounds.
    pub fn seeded() -> Self {
        Self {
            conflicts: seed::conflicts(),
            handling: seed::handling(),
            foreigners: seed::foreigners(),
            ormas: seed::ormas(),
            conflict_map_background: None,
            handling_map_background: None,
        }
    }

    /// Check a snapshot that did not arrive through [`Snapshot::upsert`]:
    /// every record passes its own validation and ids are unique within
    /// each collection.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_collection(&self.conflicts)?;
        validate_collection(&self.handling)?;
        validate_collection(&self.foreigners)?;
        validate_collection(&self.ormas)
    }

    /// Records of one kind.
    pub fn records<T: StoredRecord>(&self) -> &[T] {
        T::collection(self)
    }

    /// Look a record up by id.
    pub fn find<T: StoredRecord>(&self, id: &RecordId) -> Option<&T> {
        collection::find(T::collection(self), id)
    }

    /// Validate and upsert a record by id.
    pub fn upsert<T: StoredRecord>(&self, record: T) -> Result<(Self, UpsertOutcome), SibangdaError> {
        record.validate()?;
        let id = record.id().clone();
        let district = record.district();
        let (items, outcome) = collection::upsert_with_outcome(T::collection(self), record);
        let mut next = self.clone();
        *T::collection_mut(&mut next) = items;
        tracing::debug!(
            kind = T::KIND.as_str(),
            id = %id,
            district = %district,
            ?outcome,
            "record upserted"
        );
        Ok((next, outcome))
    }

    /// Remove every record with `id`. Declined confirmation leaves the
    /// snapshot untouched.
    pub fn remove<T: StoredRecord>(&self, id: &RecordId, confirmation: Confirmation) -> (Self, Removal) {
        if confirmation == Confirmation::Declined {
            tracing::debug!(kind = T::KIND.as_str(), id = %id, "removal declined");
            return (
                self.clone(),
                Removal {
                    confirmed: false,
                    removed: 0,
                },
            );
        }
        let before = T::collection(self).len();
        let items = collection::remove(T::collection(self), id);
        let removed = before - items.len();
        let mut next = self.clone();
        *T::collection_mut(&mut next) = items;
        tracing::debug!(kind = T::KIND.as_str(), id = %id, removed, "record removed");
        (
            next,
            Removal {
                confirmed: true,
                removed,
            },
        )
    }

    pub fn map_background(&self, map: MapKind) -> Option<&DataUrl> {
        match map {
            MapKind::Conflict => self.conflict_map_background.as_ref(),
            MapKind::Handling => self.handling_map_background.as_ref(),
        }
    }

    /// Replace the custom background of `map`.
    pub fn set_map_background(&self, map: MapKind, image: DataUrl) -> Self {
        let mut next = self.clone();
        tracing::debug!(map = %map, mime = image.mime(), "map background set");
        match map {
            MapKind::Conflict => next.conflict_map_background = Some(image),
            MapKind::Handling => next.handling_map_background = Some(image),
        }
        next
    }

    /// Revert `map` to the default base map.
    pub fn clear_map_background(&self, map: MapKind) -> Self {
        let mut next = self.clone();
        match map {
            MapKind::Conflict => next.conflict_map_background = None,
            MapKind::Handling => next.handling_map_background = None,
        }
        tracing::debug!(map = %map, "map background cleared");
        next
    }

    /// Set the scene image of a conflict or handling record.
    ///
    /// Returns the next snapshot with the updated record, or `None` when no
    /// record has the id.
    pub fn attach_image<T: ImageTarget>(&self, id: &RecordId, image: DataUrl) -> Option<(Self, T)> {
        let mut next = self.clone();
        let record = T::collection_mut(&mut next)
            .iter_mut()
            .find(|r| r.id() == id)?;
        record.set_image_url(image.to_string());
        let updated = record.clone();
        tracing::debug!(kind = T::KIND.as_str(), id = %id, "image attached");
        Some((next, updated))
    }

    /// Append a media item to a handling record's gallery.
    ///
    /// Returns the next snapshot with the updated record, or `None` when no
    /// handling record has the id.
    pub fn append_media(
        &self,
        id: &RecordId,
        media: DataUrl,
    ) -> Option<(Self, ConflictHandlingRecord)> {
        let mut next = self.clone();
        let record = next.handling.iter_mut().find(|r| &r.id == id)?;
        record.media_urls.push(media.to_string());
        let updated = record.clone();
        tracing::debug!(id = %id, count = updated.media_urls.len(), "media appended");
        Some((next, updated))
    }
}

fn validate_collection<T: Record>(items: &[T]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for record in items {
        record.validate()?;
        if !seen.insert(record.id()) {
            return Err(ValidationError::DuplicateId {
                kind: T::KIND.as_str(),
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Records that carry a single scene image.
pub trait ImageTarget: StoredRecord {
    fn set_image_url(&mut self, url: String);
}

impl ImageTarget for ConflictRecord {
    fn set_image_url(&mut self, url: String) {
        self.image_url = Some(url);
    }
}

impl ImageTarget for ConflictHandlingRecord {
    fn set_image_url(&mut self, url: String) {
        self.image_url = Some(url);
    }
}
