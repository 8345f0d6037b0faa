//! # Service state and configuration
//!
//! The issuance service carries two pieces of state: the issuer key
//! (read-only, shared across requests — every signature draws its own
//! nonce) and the issuer identifier embedded in every card.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use shc_jws::Es256KeyPair;

/// Environment variable holding the hex-encoded P-256 secret scalar.
pub const SIGNING_KEY_ENV: &str = "SHC_SIGNING_KEY";

/// Environment variable holding the issuer URL embedded in cards.
pub const ISSUER_ENV: &str = "SHC_ISSUER";

/// Environment variable holding the listen address.
pub const LISTEN_ADDR_ENV: &str = "SHC_LISTEN_ADDR";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("environment variable {0} not set")]
    Missing(&'static str),

    /// The listen address could not be parsed.
    #[error("invalid listen address {0:?}")]
    InvalidListenAddr(String),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Issuer URL embedded in every issued card. Verifiers resolve
    /// `<issuer>/.well-known/jwks.json` against it.
    pub issuer: String,
    /// Socket address to serve on.
    pub listen_addr: SocketAddr,
}

impl ServiceConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let issuer = std::env::var(ISSUER_ENV).map_err(|_| ConfigError::Missing(ISSUER_ENV))?;

        let listen_addr =
            std::env::var(LISTEN_ADDR_ENV).unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(listen_addr))?;

        Ok(Self {
            issuer,
            listen_addr,
        })
    }
}

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    /// The issuer key. Read-only after startup.
    pub key: Arc<Es256KeyPair>,
    /// Issuer identifier embedded in every card.
    pub issuer: String,
}

impl AppState {
    /// Assemble the state from a loaded key and issuer identifier.
    pub fn new(key: Es256KeyPair, issuer: impl Into<String>) -> Self {
        Self {
            key: Arc::new(key),
            issuer: issuer.into(),
        }
    }
}
