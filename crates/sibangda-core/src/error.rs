//! # Error Types
//!
//! Structured error hierarchy for the dashboard core. All errors derive
//! `thiserror::Error`; the API and CLI layers map them onto HTTP status
//! codes and exit codes respectively.
//!
//! Upsert, remove and filter are total and have no error type. Errors only
//! arise at the boundaries: parsing identifiers and enumerations from text,
//! record-level business validation, and image import.

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Error, Debug)]
pub enum SibangdaError {
    /// A value failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An uploaded image could not be imported.
    #[error("image import error: {0}")]
    Image(#[from] ImageError),
}

/// Error raised when text or a record fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record identifiers must be non-empty.
    #[error("record id must not be empty")]
    EmptyId,

    /// Two records in one collection share an id.
    #[error("duplicate {kind} id: {id:?}")]
    DuplicateId {
        /// Collection the records belong to.
        kind: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// District name is not one of the ten administrative units.
    #[error("unknown district: {0:?}")]
    UnknownDistrict(String),

    /// Conflict level is not Low, Medium or High.
    #[error("unknown conflict level: {0:?}")]
    UnknownLevel(String),

    /// Status string is not a recognised handling or organization status.
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),

    /// View name is not routable.
    #[error("unknown view: {0:?}")]
    UnknownView(String),

    /// A required text field is blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name as it appears in JSON.
        field: &'static str,
    },

    /// A text field exceeds its length limit.
    #[error("{field} must not exceed {max} characters (got {actual})")]
    FieldTooLong {
        /// Field name as it appears in JSON.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
        /// Observed length in characters.
        actual: usize,
    },
}

/// Error raised while importing an uploaded image as a data URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Content type is not `image/*`.
    #[error("content type {0:?} is not an image")]
    NotAnImage(String),

    /// Upload contained no bytes.
    #[error("image payload is empty")]
    Empty,

    /// Upload exceeds the configured size limit.
    #[error("image of {size} bytes exceeds the {max} byte limit")]
    TooLarge {
        /// Size of the upload in bytes.
        size: usize,
        /// Configured maximum in bytes.
        max: usize,
    },

    /// String is not a well-formed base64 `data:` URL.
    #[error("malformed data URL: {0}")]
    MalformedDataUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_top_level() {
        let err: SibangdaError = ValidationError::EmptyId.into();
        assert!(matches!(err, SibangdaError::Validation(ValidationError::EmptyId)));
        assert_eq!(err.to_string(), "validation error: record id must not be empty");
    }

    #[test]
    fn field_too_long_message_includes_limits() {
        let err = ValidationError::FieldTooLong {
            field: "description",
            max: 10,
            actual: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("description"));
        assert!(msg.contains("10"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn duplicate_id_names_collection() {
        let err = ValidationError::DuplicateId {
            kind: "ormas",
            id: "1".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate ormas id: \"1\"");
    }

    #[test]
    fn image_error_too_large_message() {
        let err = ImageError::TooLarge { size: 20, max: 10 };
        assert_eq!(err.to_string(), "image of 20 bytes exceeds the 10 byte limit");
    }
}
