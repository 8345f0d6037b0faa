//! # JWS error types
//!
//! Structured errors for key loading and compact JWS production.
//! No failure here is retried — a signing request either completes or
//! fails whole.

use thiserror::Error;

/// Errors from key material handling and JWS serialization.
#[derive(Error, Debug)]
pub enum JwsError {
    /// The configured key environment variable is not set.
    #[error("signing key environment variable {0} not set")]
    KeyNotConfigured(String),

    /// The key material could not be decoded into a P-256 scalar.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// ECDSA signing failed (nonce generation or scalar arithmetic).
    #[error("signing failed: {0}")]
    Signing(String),

    /// DEFLATE compression stream error.
    #[error("compression error: {0}")]
    Compression(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
