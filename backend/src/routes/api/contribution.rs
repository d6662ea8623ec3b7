//! Contribution endpoint: one full prove/verify cycle server-side

use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::contributions::ContributionFact;
use crate::session::ProofSession;
use crate::types::AppError;
use crate::webproof::{ProverClient, VerifierClient};

/// Body of `POST /api/contribution`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContributionRequest {
    /// GitHub contributors-data URL to prove
    pub url: String,
    /// Personal access token for private repositories
    #[serde(default)]
    pub github_token: Option<String>,
    /// GitHub login whose contribution count to extract
    pub username: String,
}

/// Runs a complete prove → verify → extract cycle and returns the verified
/// contribution fact for the requested login.
///
/// The session, and with it the intermediate presentation, lives only for
/// this request.
///
/// # Errors
///
/// - `400` on an invalid URL or blank username
/// - `408` when the verification deadline elapses
/// - `404` when the login does not appear in the verified payload (the
///   message lists the logins that do)
/// - `502`/`503` when the verified payload carries no usable body
/// - `500` when either upstream call fails
pub async fn handler(
    Extension(prover): Extension<Arc<ProverClient>>,
    Extension(verifier): Extension<Arc<VerifierClient>>,
    Json(request): Json<ContributionRequest>,
) -> Result<Json<ContributionFact>, AppError> {
    let mut session = ProofSession::new(prover, verifier);

    session
        .prove(&request.url, request.github_token.as_deref())
        .await?;
    let fact = session.verify(&request.username).await?;

    Ok(Json(fact))
}
