//! # Route handlers
//!
//! - `POST /` — validate the issuance form, run the signing pipeline,
//!   and respond with a PNG (single chunk) or a ZIP archive of PNGs
//!   (multiple chunks).
//! - `GET /.well-known/jwks.json` — the public key set, served with
//!   permissive CORS since wallets fetch it unauthenticated.
//! - `GET /health/liveness` — process-up probe.

use std::io::Write;

use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use shc_fhir::HealthCardPayload;
use shc_jws::{sign_and_serialize, JwkSet, KeyIdentity};
use shc_qr::QrChunk;

use crate::error::AppError;
use crate::form::{self, IssueForm};
use crate::state::AppState;

/// Assemble the service routes.
pub fn router() -> Router<AppState> {
    let discovery = Router::new()
        .route("/.well-known/jwks.json", get(jwks_document))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", post(issue_card))
        .route("/health/liveness", get(liveness))
        .merge(discovery)
}

/// GET /health/liveness — always 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /.well-known/jwks.json — the issuer's public key set.
async fn jwks_document(State(state): State<AppState>) -> Json<JwkSet> {
    Json(state.key.jwks())
}

/// POST / — issue a SMART Health Card from form input.
async fn issue_card(
    State(state): State<AppState>,
    Form(form): Form<IssueForm>,
) -> Result<Response, AppError> {
    let bundle = form::parse(&form)?;

    let payload = HealthCardPayload::new(bundle, state.issuer.clone(), None);
    let payload_bytes = payload.to_json_bytes().map_err(shc_jws::JwsError::from)?;

    let jws = sign_and_serialize(&payload_bytes, state.key.as_ref())?;
    let chunks = shc_qr::encode(&jws)?;

    tracing::info!(
        jws_len = jws.len(),
        chunks = chunks.len(),
        "issued health card"
    );

    if chunks.len() == 1 {
        let png = shc_qr::render_png(&chunks[0].payload)?;
        Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
    } else {
        let archive = zip_chunks(&chunks)?;
        Ok(([(header::CONTENT_TYPE, "application/zip")], archive).into_response())
    }
}

/// Render each chunk as `<index>.png` inside a ZIP archive, in chunk
/// order. A single QR image cannot carry more than one chunk, so the
/// archive is the multi-chunk packaging.
fn zip_chunks(chunks: &[QrChunk]) -> Result<Vec<u8>, AppError> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    for chunk in chunks {
        let png = shc_qr::render_png(&chunk.payload)?;
        writer
            .start_file(format!("{}.png", chunk.index), options)
            .map_err(|e| AppError::Internal(format!("zip write failed: {e}")))?;
        writer
            .write_all(&png)
            .map_err(|e| AppError::Internal(format!("zip write failed: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Internal(format!("zip finalize failed: {e}")))?;
    Ok(cursor.into_inner())
}
