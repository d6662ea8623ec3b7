//! Prove endpoint: relays a fetch request to the proving service

use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::types::AppError;
use crate::webproof::headers::parse_target_url;
use crate::webproof::{Presentation, ProveRequest, ProverClient};

/// Body of `POST /api/prove`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProveApiRequest {
    /// Absolute http(s) URL to prove
    pub url: String,
    /// Outbound headers as `Name: Value` strings, relayed verbatim and in
    /// order
    #[serde(default)]
    pub headers: Vec<String>,
}

/// Relays a fetch request to the proving service and returns the resulting
/// presentation unmodified.
///
/// The caller-supplied headers pass through untouched — no deduplication, no
/// reordering. An invalid or empty URL is rejected before any network call.
///
/// # Errors
///
/// - `400` on an invalid target URL
/// - `500` when the proving call fails
pub async fn handler(
    Extension(prover): Extension<Arc<ProverClient>>,
    Json(request): Json<ProveApiRequest>,
) -> Result<Json<Presentation>, AppError> {
    parse_target_url(&request.url)?;

    let presentation = prover
        .prove(&ProveRequest {
            url: request.url.trim().to_string(),
            headers: request.headers,
        })
        .await?;

    Ok(Json(presentation))
}
