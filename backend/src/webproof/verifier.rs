//! Client for the verification endpoint

use std::time::Duration;

use reqwest::StatusCode;

use super::error::VerifyError;
use super::request::http_client;
use super::types::{Presentation, VerifiedEnvelope};

/// Client for the web-prover's verification endpoint.
///
/// Every call carries the fixed service credentials and runs under a hard
/// deadline covering the whole round trip, connect through body read. The
/// deadline must stay below any outer request cap so that a slow upstream
/// surfaces as a distinguishable timeout rather than a severed connection.
#[derive(Debug, Clone)]
pub struct VerifierClient {
    endpoint: String,
    client_id: String,
    api_token: String,
    deadline: Duration,
}

impl VerifierClient {
    /// Creates a client for `endpoint` with the given service credentials
    /// and per-call deadline.
    #[must_use]
    pub const fn new(
        endpoint: String,
        client_id: String,
        api_token: String,
        deadline: Duration,
    ) -> Self {
        Self {
            endpoint,
            client_id,
            api_token,
            deadline,
        }
    }

    /// Submits a presentation for verification and returns the verified
    /// envelope.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::Timeout`] when the deadline elapses first — never
    ///   conflated with a service failure
    /// - [`VerifyError::Service`] when the service answers non-2xx
    /// - [`VerifyError::Transport`] when the request never completes
    /// - [`VerifyError::InvalidResponse`] when a 2xx body is not a valid
    ///   envelope
    pub async fn verify(
        &self,
        presentation: &Presentation,
    ) -> Result<VerifiedEnvelope, VerifyError> {
        let round_trip = async {
            let response = http_client()
                .post(&self.endpoint)
                .header("x-client-id", &self.client_id)
                .bearer_auth(&self.api_token)
                .json(presentation)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            Ok::<(StatusCode, String), reqwest::Error>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.deadline, round_trip)
            .await
            .map_err(|_| VerifyError::Timeout(self.deadline))?
            .map_err(|err| {
                // reqwest's own timeout classification counts as the deadline
                // firing, not as a transport fault
                if err.is_timeout() {
                    VerifyError::Timeout(self.deadline)
                } else {
                    VerifyError::Transport(err)
                }
            })?;

        if !status.is_success() {
            tracing::warn!(%status, "verification service rejected the presentation");
            return Err(VerifyError::Service { status, body });
        }

        let envelope: VerifiedEnvelope = serde_json::from_str(&body)?;
        tracing::debug!(
            proven_status = envelope.response.status,
            body_len = envelope.response.body.as_ref().map_or(0, String::len),
            "presentation verified"
        );
        Ok(envelope)
    }
}
