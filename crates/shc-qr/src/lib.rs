//! # shc-qr — QR encoding for SMART Health Cards
//!
//! Maps a signed compact JWS string onto one or more QR-encodable
//! payloads and renders them as symbols:
//!
//! - **Chunking** ([`encode`]) — a JWS of up to 1195 characters fits a
//!   single chunk; longer strings split into `ceil(len / 1191)`
//!   near-equal pieces, each tagged `shc:/<index>/<total>/` so a wallet
//!   can reassemble them.
//! - **Numeric encoding** — every JWS character becomes its code point
//!   minus 45, rendered as exactly two decimal digits.
//! - **Rendering** ([`render_png`]) — each payload becomes a version-22
//!   QR symbol at medium error correction, rasterized as a PNG.
//!
//! [`decode`] reverses the chunk protocol; it exists for verifier-side
//! round-trip checks.

pub mod chunk;
pub mod error;
pub mod render;

// Re-export primary types.
pub use chunk::{
    decode, encode, QrChunk, MAX_MULTI_CHUNK_LEN, MAX_SINGLE_CHUNK_LEN,
};
pub use error::QrError;
pub use render::{render_png, symbol, MIN_IMAGE_SIZE, SYMBOL_VERSION};
