//! # shc-api — SMART Health Card issuance service
//!
//! A small Axum service wrapping the issuance pipeline:
//!
//! | Route                      | Handler                | Response |
//! |----------------------------|------------------------|----------|
//! | `POST /`                   | [`routes`]             | `image/png` or `application/zip` |
//! | `GET /.well-known/jwks.json` | [`routes`]           | JWKS, permissive CORS |
//! | `GET /health/liveness`     | [`routes`]             | `ok` |
//!
//! The signing key and issuer identifier are read once at startup; per
//! request the pipeline is a pure computation, so concurrent requests
//! share state without coordination.

pub mod error;
pub mod form;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
