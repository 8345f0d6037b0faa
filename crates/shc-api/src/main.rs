//! # shc-api entry point
//!
//! Loads the issuer key and configuration from the environment, then
//! serves the issuance routes until shutdown.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use shc_api::state::{AppState, ServiceConfig, SIGNING_KEY_ENV};
use shc_jws::Es256KeyPair;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let key = match Es256KeyPair::from_env(SIGNING_KEY_ENV) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("key loading error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(key, config.issuer.clone());

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, "bind failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        addr = %config.listen_addr,
        issuer = %config.issuer,
        "health card issuer listening"
    );

    if let Err(e) = axum::serve(listener, shc_api::app(state)).await {
        tracing::error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
