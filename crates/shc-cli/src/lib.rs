//! # shc-cli — operator tooling for the health card issuer
//!
//! Subcommand implementations for the `shc` binary:
//!
//! - [`keygen`] — generate a fresh P-256 issuer key and print the
//!   environment export line.
//! - [`jwks`] — print the JWKS discovery document for the configured key.
//! - [`issue`] — offline issuance: read a JSON immunization record and
//!   write the QR PNG file(s).

pub mod issue;
pub mod jwks;
pub mod keygen;

/// Environment variable holding the hex-encoded P-256 secret scalar.
pub const SIGNING_KEY_ENV: &str = "SHC_SIGNING_KEY";

/// Environment variable holding the issuer URL.
pub const ISSUER_ENV: &str = "SHC_ISSUER";
