//! # Custom Extractors
//!
//! Helpers that turn axum rejections into [`AppError`] values, and the
//! shared `?district=` query used by every filtered listing.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use sibangda_core::DistrictFilter;
use utoipa::IntoParams;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// Negative or non-numeric counts fail here, before any record reaches the
/// snapshot.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract query parameters, mapping parse errors to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Dashboard scope selector. Absent, blank or `"Semua Wilayah"` means every
/// district.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DistrictQuery {
    /// District display name, e.g. `Lombok Tengah`.
    pub district: Option<String>,
}

impl DistrictQuery {
    pub fn filter(&self) -> Result<DistrictFilter, AppError> {
        Ok(DistrictFilter::from_query(self.district.as_deref())?)
    }
}

/// Resolve the district filter straight from a query extraction result.
pub fn extract_filter(
    result: Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<DistrictFilter, AppError> {
    extract_query(result)?.filter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sibangda_core::District;

    #[test]
    fn missing_district_means_all() {
        let q = DistrictQuery::default();
        assert_eq!(q.filter().unwrap(), DistrictFilter::All);
    }

    #[test]
    fn sentinel_means_all() {
        let q = DistrictQuery {
            district: Some("Semua Wilayah".to_string()),
        };
        assert_eq!(q.filter().unwrap(), DistrictFilter::All);
    }

    #[test]
    fn named_district_is_selected() {
        let q = DistrictQuery {
            district: Some("Kota Bima".to_string()),
        };
        assert_eq!(q.filter().unwrap(), DistrictFilter::Only(District::KotaBima));
    }

    #[test]
    fn unknown_district_is_bad_request() {
        let q = DistrictQuery {
            district: Some("Jakarta".to_string()),
        };
        assert!(matches!(q.filter(), Err(AppError::BadRequest(_))));
    }
}
