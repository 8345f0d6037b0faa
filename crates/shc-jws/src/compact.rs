//! # Compact JWS serialization
//!
//! Produces the signed credential string
//! `base64url(header).base64url(deflate(payload)).base64url(r‖s)`.
//!
//! The header and payload segments are fully deterministic for a given
//! input; the signature segment is not (fresh nonce per call). All
//! Base64URL is unpadded.

use std::io::Write;

use base64ct::{Base64UrlUnpadded, Encoding};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::JwsError;
use crate::jwk::ALGORITHM;
use crate::key::{Es256Signer, KeyIdentity};

/// The protected JWS header of a SMART Health Card.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    pub zip: String,
    pub kid: String,
}

impl Header {
    fn for_key(key: &impl KeyIdentity) -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            zip: "DEF".to_string(),
            kid: key.key_id(),
        }
    }
}

/// Compress, sign, and serialize a payload as a compact JWS.
///
/// Steps, in order: build the `{alg, zip, kid}` header; raw-DEFLATE
/// the payload at best compression; sign the ASCII bytes of
/// `header.payload`; append the fixed-width `r‖s` signature segment.
///
/// Any failure is surfaced to the caller; nothing is retried.
pub fn sign_and_serialize<K>(payload: &[u8], key: &K) -> Result<String, JwsError>
where
    K: Es256Signer + KeyIdentity,
{
    tracing::debug!(payload_len = payload.len(), "signing health card payload");

    let header_bytes = serde_json::to_vec(&Header::for_key(key))?;
    let header_b64 = Base64UrlUnpadded::encode_string(&header_bytes);

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(payload)?;
    let compressed = encoder.finish()?;
    let payload_b64 = Base64UrlUnpadded::encode_string(&compressed);

    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = key.sign(signing_input.as_bytes())?;
    let signature_b64 = Base64UrlUnpadded::encode_string(&signature);

    Ok(format!("{signing_input}.{signature_b64}"))
}
