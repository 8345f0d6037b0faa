//! # QR encoding error types

use thiserror::Error;

/// Errors from chunk encoding, reassembly, and symbol rendering.
#[derive(Error, Debug)]
pub enum QrError {
    /// The input contains a character outside the Base64URL-plus-`.`
    /// alphabet a compact JWS is built from.
    #[error("character {0:?} is not valid in a compact JWS")]
    InvalidCharacter(char),

    /// A chunk payload does not follow the `shc:/` protocol.
    #[error("malformed chunk payload: {0}")]
    MalformedPayload(String),

    /// The chunk set is incomplete or inconsistent (missing indices,
    /// disagreeing totals).
    #[error("inconsistent chunk set: {0}")]
    InconsistentChunks(String),

    /// QR symbol construction failed (data exceeds the fixed version's
    /// capacity). Not expected for payloads within the chunk-size bound.
    #[error("QR symbol construction failed: {0}")]
    Symbol(#[from] qrcode::types::QrError),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}
