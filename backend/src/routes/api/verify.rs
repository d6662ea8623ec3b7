//! Verify endpoint: submits a presentation for verification

use std::sync::Arc;

use axum::{Extension, Json};

use crate::types::AppError;
use crate::webproof::{Presentation, VerifiedEnvelope, VerifierClient};

/// Submits the posted presentation to the verification service and returns
/// the verified envelope.
///
/// # Errors
///
/// - `408` when the verification deadline elapses
/// - `500` on any other verification failure
pub async fn handler(
    Extension(verifier): Extension<Arc<VerifierClient>>,
    Json(presentation): Json<Presentation>,
) -> Result<Json<VerifiedEnvelope>, AppError> {
    let envelope = verifier.verify(&presentation).await?;
    Ok(Json(envelope))
}
