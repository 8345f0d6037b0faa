//! # JWK documents and key id derivation
//!
//! The public half of an issuer key, in the JSON Web Key shape a
//! verifying wallet resolves from `/.well-known/jwks.json`.
//!
//! The key id is the Base64URL-encoded SHA-256 digest of the exact
//! string `{"crv":"P-256","kty":"EC","x":"<X>","y":"<Y>"}`. That field
//! order is part of the contract: the string is hashed as raw bytes,
//! not compared structurally, so issuer and verifier must produce it
//! byte-for-byte identically.

use base64ct::{Base64UrlUnpadded, Encoding};
use p256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// JWS signing algorithm identifier.
pub const ALGORITHM: &str = "ES256";

/// Elliptic curve name.
pub const CURVE: &str = "P-256";

/// JWK key type.
pub const KEY_TYPE: &str = "EC";

/// A public JSON Web Key for an ES256 issuer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub use_: String,
    pub alg: String,
    pub crv: String,
    pub x: String,
    pub y: String,
}

impl Jwk {
    /// Build the JWK for a P-256 verifying key.
    ///
    /// Coordinates are fixed-width 32-byte big-endian integers,
    /// Base64URL-encoded without padding.
    pub fn from_verifying_key(vk: &VerifyingKey) -> Self {
        let point = vk.to_encoded_point(false);
        let (Some(x), Some(y)) = (point.x(), point.y()) else {
            unreachable!("a P-256 verifying key always has affine coordinates");
        };

        let x = Base64UrlUnpadded::encode_string(x);
        let y = Base64UrlUnpadded::encode_string(y);
        let kid = thumbprint(&x, &y);

        Self {
            kty: KEY_TYPE.to_string(),
            kid,
            use_: "sig".to_string(),
            alg: ALGORITHM.to_string(),
            crv: CURVE.to_string(),
            x,
            y,
        }
    }
}

/// A JSON Web Key Set holding the issuer's public key(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// A key set holding the given keys.
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }
}

/// Derive the key id from Base64URL-encoded public coordinates.
pub fn thumbprint(x: &str, y: &str) -> String {
    let canonical = format!(r#"{{"crv":"{CURVE}","kty":"{KEY_TYPE}","x":"{x}","y":"{y}"}}"#);
    let digest = Sha256::digest(canonical.as_bytes());
    Base64UrlUnpadded::encode_string(&digest)
}
