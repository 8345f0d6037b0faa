//! # Issuer key material
//!
//! Wraps a P-256 signing key behind two narrow capabilities:
//!
//! - [`Es256Signer`] — produce a raw 64-byte `r‖s` ECDSA signature over
//!   a signing input.
//! - [`KeyIdentity`] — export the public JWK, the derived key id, and
//!   the JWKS document.
//!
//! Consumers compose the traits they need rather than receiving the
//! whole key pair. The key is loaded once at startup and only ever read
//! afterwards, so sharing one instance across concurrent signing
//! requests is safe — each signature draws an independent nonce.

use p256::ecdsa::signature::RandomizedSigner;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand_core::{CryptoRngCore, OsRng};
use zeroize::Zeroize;

use crate::error::JwsError;
use crate::jwk::{Jwk, JwkSet};

/// Produce raw ES256 signatures over an arbitrary signing input.
///
/// The signature is the concatenation of `r` and `s`, each a
/// fixed-width 32-byte big-endian integer. Signing is randomized: a
/// fresh nonce is drawn per call, so repeated calls over the same input
/// yield different, equally valid signatures.
pub trait Es256Signer {
    /// SHA-256 the signing input and ECDSA-sign the digest.
    fn sign(&self, signing_input: &[u8]) -> Result<[u8; 64], JwsError>;
}

/// Export the public identity of a signing key.
pub trait KeyIdentity {
    /// The public key as a JWK.
    fn public_jwk(&self) -> Jwk;

    /// The derived key id (JWK thumbprint). Stable for a fixed key.
    fn key_id(&self) -> String {
        self.public_jwk().kid
    }

    /// The JWKS discovery document for this key.
    fn jwks(&self) -> JwkSet {
        JwkSet::new(vec![self.public_jwk()])
    }
}

/// A P-256 key pair for issuing SMART Health Cards.
#[derive(Clone)]
pub struct Es256KeyPair {
    key: SigningKey,
}

/// Secret material never appears in debug output.
impl std::fmt::Debug for Es256KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Es256KeyPair").finish_non_exhaustive()
    }
}

impl Es256KeyPair {
    /// Generate a fresh key pair from the given CSPRNG.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            key: SigningKey::random(rng),
        }
    }

    /// Load a key pair from a 64-hex-character secret scalar.
    ///
    /// The public point is derived from the scalar, so there is no
    /// mismatched-coordinate failure mode. The decoded scalar bytes are
    /// zeroized after the key is constructed.
    pub fn from_secret_hex(hex: &str) -> Result<Self, JwsError> {
        let mut bytes = decode_hex(hex)?;
        if bytes.len() != 32 {
            bytes.zeroize();
            return Err(JwsError::InvalidKey(format!(
                "expected 32 bytes (64 hex chars), got {} bytes",
                hex.len() / 2
            )));
        }

        let result = SigningKey::from_slice(&bytes)
            .map(|key| Self { key })
            .map_err(|e| JwsError::InvalidKey(e.to_string()));
        bytes.zeroize();
        result
    }

    /// Load a key pair from the named environment variable.
    pub fn from_env(var_name: &str) -> Result<Self, JwsError> {
        let hex = std::env::var(var_name)
            .map_err(|_| JwsError::KeyNotConfigured(var_name.to_string()))?;
        Self::from_secret_hex(hex.trim())
    }

    /// The secret scalar as lowercase hex, for key-generation tooling.
    pub fn secret_hex(&self) -> String {
        encode_hex(&self.key.to_bytes())
    }

    /// The verifying (public) key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.key.verifying_key()
    }

    /// Sign with an explicit nonce source.
    ///
    /// [`Es256Signer::sign`] is this with the OS CSPRNG.
    pub fn sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        signing_input: &[u8],
    ) -> Result<[u8; 64], JwsError> {
        let signature: Signature = self
            .key
            .try_sign_with_rng(rng, signing_input)
            .map_err(|e| JwsError::Signing(e.to_string()))?;

        let mut raw = [0u8; 64];
        raw.copy_from_slice(&signature.to_bytes());
        Ok(raw)
    }
}

impl Es256Signer for Es256KeyPair {
    fn sign(&self, signing_input: &[u8]) -> Result<[u8; 64], JwsError> {
        self.sign_with_rng(&mut OsRng, signing_input)
    }
}

impl KeyIdentity for Es256KeyPair {
    fn public_jwk(&self) -> Jwk {
        Jwk::from_verifying_key(self.key.verifying_key())
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, JwsError> {
    if !hex.is_ascii() {
        return Err(JwsError::InvalidKey("non-ASCII key material".to_string()));
    }
    if hex.len() % 2 != 0 {
        return Err(JwsError::InvalidKey("odd hex length".to_string()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| JwsError::InvalidKey(format!("invalid hex at offset {i}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::signature::Verifier;

    #[test]
    fn generated_key_signs_verifiably() {
        let pair = Es256KeyPair::generate(&mut OsRng);
        let msg = b"header.payload";
        let raw = pair.sign(msg).unwrap();

        let signature = Signature::from_slice(&raw).unwrap();
        assert!(pair.verifying_key().verify(msg, &signature).is_ok());
    }

    #[test]
    fn signatures_are_randomized_but_valid() {
        let pair = Es256KeyPair::generate(&mut OsRng);
        let msg = b"same input";
        let a = pair.sign(msg).unwrap();
        let b = pair.sign(msg).unwrap();
        assert_ne!(a, b, "two nonces should never collide");

        for raw in [a, b] {
            let signature = Signature::from_slice(&raw).unwrap();
            assert!(pair.verifying_key().verify(msg, &signature).is_ok());
        }
    }

    #[test]
    fn secret_hex_roundtrips() {
        let pair = Es256KeyPair::generate(&mut OsRng);
        let restored = Es256KeyPair::from_secret_hex(&pair.secret_hex()).unwrap();
        assert_eq!(pair.key_id(), restored.key_id());
    }

    #[test]
    fn from_secret_hex_rejects_invalid_hex() {
        let err = Es256KeyPair::from_secret_hex("zz".repeat(32).as_str()).unwrap_err();
        assert!(matches!(err, JwsError::InvalidKey(_)));
    }

    #[test]
    fn from_secret_hex_rejects_wrong_length() {
        let err = Es256KeyPair::from_secret_hex("aabbccdd").unwrap_err();
        assert!(matches!(err, JwsError::InvalidKey(_)));
    }

    #[test]
    fn from_secret_hex_rejects_odd_length() {
        let err = Es256KeyPair::from_secret_hex("abc").unwrap_err();
        assert!(matches!(err, JwsError::InvalidKey(_)));
    }

    #[test]
    fn from_secret_hex_rejects_zero_scalar() {
        // The zero scalar is not a valid P-256 secret key.
        let err = Es256KeyPair::from_secret_hex(&"00".repeat(32)).unwrap_err();
        assert!(matches!(err, JwsError::InvalidKey(_)));
    }

    #[test]
    fn from_env_missing_variable() {
        let err = Es256KeyPair::from_env("SHC_TEST_KEY_THAT_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, JwsError::KeyNotConfigured(_)));
    }

    #[test]
    fn from_env_loads_valid_key() {
        let pair = Es256KeyPair::generate(&mut OsRng);
        let var = "SHC_TEST_KEY_FROM_ENV";
        std::env::set_var(var, pair.secret_hex());

        let loaded = Es256KeyPair::from_env(var).unwrap();
        assert_eq!(pair.key_id(), loaded.key_id());

        std::env::remove_var(var);
    }

    #[test]
    fn key_id_is_stable() {
        let pair = Es256KeyPair::generate(&mut OsRng);
        assert_eq!(pair.key_id(), pair.key_id());
    }

    #[test]
    fn jwks_contains_exactly_the_public_jwk() {
        let pair = Es256KeyPair::generate(&mut OsRng);
        let jwks = pair.jwks();
        assert_eq!(jwks.keys.len(), 1);
        assert_eq!(jwks.keys[0], pair.public_jwk());
    }

    #[test]
    fn key_pair_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Es256KeyPair>();
    }

    #[test]
    fn hex_helpers_roundtrip() {
        let bytes = [0x00, 0x01, 0xab, 0xff];
        let hex = encode_hex(&bytes);
        assert_eq!(hex, "0001abff");
        assert_eq!(decode_hex(&hex).unwrap(), bytes);
    }
}
