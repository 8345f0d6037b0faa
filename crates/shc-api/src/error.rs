//! # API error types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from shc-fhir, shc-jws, and shc-qr to HTTP
//! status codes with JSON error bodies. Internal error details are
//! logged for operators, never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type for the issuance service.
#[derive(Error, Debug)]
pub enum AppError {
    /// The submitted record is missing, partial, or malformed (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// The signed credential cannot fit the configured QR policy (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Encoding or signing failure (500). Message is logged but not
    /// returned to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<shc_fhir::FhirError> for AppError {
    fn from(err: shc_fhir::FhirError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<shc_jws::JwsError> for AppError {
    fn from(err: shc_jws::JwsError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<shc_qr::QrError> for AppError {
    fn from(err: shc_qr::QrError) -> Self {
        match &err {
            // Capacity overflow at the fixed symbol version. Should not
            // occur within the chunk-size bound.
            shc_qr::QrError::Symbol(_) => Self::PayloadTooLarge(
                "the signed credential is too large to encode as QR codes; \
                 reduce the amount of free-text input"
                    .to_string(),
            ),
            _ => Self::Internal(err.to_string()),
        }
    }
}
