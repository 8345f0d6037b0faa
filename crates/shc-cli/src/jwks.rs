//! # JWKS printing
//!
//! Prints the public key set for the configured signing key — the same
//! document the API serves at `/.well-known/jwks.json`, for deployments
//! that host the discovery document statically.

use clap::Args;

use shc_jws::{Es256KeyPair, KeyIdentity};

use crate::SIGNING_KEY_ENV;

/// Arguments for `shc jwks`.
#[derive(Args, Debug)]
pub struct JwksArgs {
    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Load the key from the environment and print its JWKS document.
pub fn run_jwks(args: &JwksArgs) -> anyhow::Result<u8> {
    let key = Es256KeyPair::from_env(SIGNING_KEY_ENV)?;
    let jwks = key.jwks();

    let json = if args.compact {
        serde_json::to_string(&jwks)?
    } else {
        serde_json::to_string_pretty(&jwks)?
    };
    println!("{json}");

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_jwks_fails_without_a_key() {
        std::env::remove_var(SIGNING_KEY_ENV);
        let args = JwksArgs { compact: false };
        assert!(run_jwks(&args).is_err());
    }
}
