//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps `sibangda-core` errors to HTTP status codes and returns JSON bodies
//! with an error code, message and optional details. Internal error text is
//! logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sibangda_core::{ImageError, SibangdaError, ValidationError};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Record or resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Business-rule validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed body, path or query value (400). Covers negative and
    /// non-numeric counts rejected during deserialization.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Upload exceeds the configured image size limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Upload is not an `image/*` content type (415).
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE")
            }
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Construct a not-found error for a record kind and id.
    pub fn record_not_found(kind: &str, id: &str) -> Self {
        Self::NotFound(format!("{kind} record {id:?} does not exist"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Unknown districts, views and enumeration values in paths or queries are
/// malformed requests; record-level rule violations are validation failures.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownDistrict(_)
            | ValidationError::UnknownLevel(_)
            | ValidationError::UnknownStatus(_)
            | ValidationError::UnknownView(_)
            | ValidationError::EmptyId
            | ValidationError::DuplicateId { .. } => Self::BadRequest(err.to_string()),
            ValidationError::EmptyField { .. } | ValidationError::FieldTooLong { .. } => {
                Self::Validation(err.to_string())
            }
        }
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::NotAnImage(_) => Self::UnsupportedMediaType(err.to_string()),
            ImageError::TooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            ImageError::Empty | ImageError::MalformedDataUrl(_) => {
                Self::BadRequest(err.to_string())
            }
        }
    }
}

impl From<SibangdaError> for AppError {
    fn from(err: SibangdaError) -> Self {
        match err {
            SibangdaError::Validation(e) => e.into(),
            SibangdaError::Image(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_code() {
        let err = AppError::record_not_found("ormas", "9");
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert!(err.to_string().contains("\"9\""));
    }

    #[test]
    fn validation_status_code() {
        let err = AppError::Validation("name must not be empty".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn bad_request_status_code() {
        let err = AppError::BadRequest("incidents: invalid type".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn image_errors_map_to_upload_statuses() {
        let (status, _) = AppError::from(ImageError::TooLarge { size: 2, max: 1 }).status_and_code();
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let (status, _) =
            AppError::from(ImageError::NotAnImage("text/plain".into())).status_and_code();
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let (status, _) = AppError::from(ImageError::Empty).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_district_is_bad_request() {
        let err = AppError::from(ValidationError::UnknownDistrict("Atlantis".into()));
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn record_rule_violation_is_validation() {
        let err = AppError::from(SibangdaError::Validation(ValidationError::EmptyField {
            field: "name",
        }));
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn error_body_serializes() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "TEST".to_string(),
                message: "test message".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("TEST"));
        assert!(!json.contains("details"));
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_not_found() {
        let (status, body) = response_parts(AppError::NotFound("conflict x".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("conflict x"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("lock state broken".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }
}
