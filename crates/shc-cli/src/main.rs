//! # shc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shc_cli::issue::{run_issue, IssueArgs};
use shc_cli::jwks::{run_jwks, JwksArgs};
use shc_cli::keygen::{run_keygen, KeygenArgs};

/// SMART Health Cards issuer toolchain.
///
/// Generates issuer keys, prints the public JWKS discovery document,
/// and issues immunization card QR codes offline.
#[derive(Parser, Debug)]
#[command(name = "shc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a fresh P-256 issuer key.
    Keygen(KeygenArgs),

    /// Print the JWKS document for the configured key.
    Jwks(JwksArgs),

    /// Issue a health card from a JSON immunization record.
    Issue(IssueArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Jwks(args) => run_jwks(&args),
        Commands::Issue(args) => run_issue(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
