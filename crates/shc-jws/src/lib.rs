//! # shc-jws — compact JWS production for SMART Health Cards
//!
//! Everything between a JSON payload and the signed credential string:
//!
//! - **Key material** ([`Es256KeyPair`]) — a P-256 signing key with
//!   generation, hex-scalar loading, and the two capability seams the
//!   rest of the stack composes: [`Es256Signer`] (raw ECDSA signatures)
//!   and [`KeyIdentity`] (`kid` + public JWK export).
//! - **JWK documents** ([`Jwk`], [`JwkSet`]) — the public-key discovery
//!   JSON a verifying wallet fetches, with the RFC 7638-style thumbprint
//!   used as the key id.
//! - **Compact serialization** ([`sign_and_serialize`]) — DEFLATE the
//!   payload, sign `header.payload` with ES256, emit the three unpadded
//!   Base64URL segments.
//!
//! Signing draws a fresh random nonce per call, so two signatures over
//! identical input differ; verify signatures, never compare their bytes.

pub mod compact;
pub mod error;
pub mod jwk;
pub mod key;

// Re-export primary types.
pub use compact::{sign_and_serialize, Header};
pub use error::JwsError;
pub use jwk::{Jwk, JwkSet, ALGORITHM, CURVE, KEY_TYPE};
pub use key::{Es256KeyPair, Es256Signer, KeyIdentity};
