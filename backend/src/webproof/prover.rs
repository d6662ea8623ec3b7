//! Client for the proving endpoint

use std::time::Duration;

use super::error::ProveError;
use super::request::http_client;
use super::types::{Presentation, ProveRequest};

/// Client for the web-prover's proving endpoint.
///
/// One call is one attempt: failures are surfaced to the caller, who decides
/// whether to trigger a fresh cycle. Nothing is retried here.
#[derive(Debug, Clone)]
pub struct ProverClient {
    endpoint: String,
    timeout: Option<Duration>,
}

impl ProverClient {
    /// Creates a client for `endpoint`.
    ///
    /// `timeout` bounds a single proving call; `None` leaves the call on the
    /// transport's default behavior.
    #[must_use]
    pub const fn new(endpoint: String, timeout: Option<Duration>) -> Self {
        Self { endpoint, timeout }
    }

    /// Submits `request` to the proving service and returns the presentation
    /// unmodified.
    ///
    /// # Errors
    ///
    /// - [`ProveError::Service`] when the service answers non-2xx, carrying
    ///   the status and the body read as text
    /// - [`ProveError::Transport`] when the request never completes
    /// - [`ProveError::InvalidResponse`] when a 2xx body is not valid JSON
    pub async fn prove(&self, request: &ProveRequest) -> Result<Presentation, ProveError> {
        tracing::debug!(
            url = %request.url,
            header_count = request.headers.len(),
            "submitting prove request"
        );

        let mut outbound = http_client().post(&self.endpoint).json(request);
        if let Some(timeout) = self.timeout {
            outbound = outbound.timeout(timeout);
        }

        let response = outbound.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(%status, "proving service rejected the request");
            return Err(ProveError::Service { status, body });
        }

        let body = response.text().await?;
        let presentation: Presentation = serde_json::from_str(&body)?;
        Ok(presentation)
    }
}
