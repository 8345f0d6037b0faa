//! # Key generation
//!
//! Generates a fresh P-256 issuer key from the OS CSPRNG and prints it
//! as an environment export line, the way the key is consumed by both
//! the API service and the `issue` subcommand.

use clap::Args;
use rand_core::OsRng;

use shc_jws::{Es256KeyPair, KeyIdentity};

use crate::SIGNING_KEY_ENV;

/// Arguments for `shc keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Also print the public JWK for the generated key.
    #[arg(long)]
    pub show_jwk: bool,
}

/// Generate a key and print the export line plus the derived key id.
pub fn run_keygen(args: &KeygenArgs) -> anyhow::Result<u8> {
    let key = Es256KeyPair::generate(&mut OsRng);

    println!("export {}={}", SIGNING_KEY_ENV, key.secret_hex());
    println!("# kid: {}", key.key_id());

    if args.show_jwk {
        println!("{}", serde_json::to_string_pretty(&key.public_jwk())?);
    }

    Ok(0)
}
