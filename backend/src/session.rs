//! Prove/verify cycle orchestration.
//!
//! A [`ProofSession`] walks one cycle through
//! `Idle → Proving → Proved → Verifying → Verified`, holding the presentation
//! between the two phases. The session is an owned value: the retained
//! presentation lives inside it, never in process-wide state, so concurrent
//! sessions cannot cross-talk. Mutual exclusion within a session comes from
//! the `&mut self` receivers — at most one phase runs at a time, without a
//! lock.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::contributions::{extract_contribution, ContributionFact, ExtractError};
use crate::webproof::headers::{build_headers, parse_target_url};
use crate::webproof::{
    Presentation, ProveError, ProveRequest, ProverClient, TargetUrlError, VerifierClient,
    VerifyError,
};

/// The phase a failure originated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Submitting the fetch request to the proving service
    Prove,
    /// Submitting the presentation to the verification service
    Verify,
    /// Extracting the fact from the verified payload
    Extract,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prove => write!(f, "prove"),
            Self::Verify => write!(f, "verify"),
            Self::Extract => write!(f, "extract"),
        }
    }
}

/// Where a session currently is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No cycle started yet
    Idle,
    /// Prove call in flight
    Proving,
    /// Presentation retained, awaiting verification
    Proved,
    /// Verify call in flight
    Verifying,
    /// Cycle completed, fact extracted
    Verified,
    /// A phase failed; a new prove call starts a fresh cycle
    Failed(Stage),
}

/// Failures surfaced by a session, tagged by origin
#[derive(Debug, Error)]
pub enum SessionError {
    /// The target URL was rejected before any network call
    #[error(transparent)]
    Input(#[from] TargetUrlError),

    /// Verification was requested without a retained presentation
    #[error("no presentation retained; prove a URL first")]
    MissingPresentation,

    /// Verification was requested with a blank identity
    #[error("identity must not be empty")]
    EmptyIdentity,

    /// The proving call failed
    #[error(transparent)]
    Prove(#[from] ProveError),

    /// The verification call failed
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// The fact could not be extracted from the verified payload
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// One prove/verify cycle against the web-prover service.
///
/// The session exclusively owns the in-flight presentation; it is overwritten
/// by a new prove call and never mutated concurrently.
pub struct ProofSession {
    prover: Arc<ProverClient>,
    verifier: Arc<VerifierClient>,
    state: SessionState,
    presentation: Option<Presentation>,
}

impl ProofSession {
    /// Creates an idle session over the given clients.
    #[must_use]
    pub const fn new(prover: Arc<ProverClient>, verifier: Arc<VerifierClient>) -> Self {
        Self {
            prover,
            verifier,
            state: SessionState::Idle,
            presentation: None,
        }
    }

    /// Current state of the cycle.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The retained presentation, when one is held.
    #[must_use]
    pub const fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    /// Runs the prove phase for `target_url`.
    ///
    /// Allowed from any state; a prior presentation or result is discarded.
    /// The URL is validated first — a rejected URL causes no state
    /// transition. On success the presentation is retained for the verify
    /// phase; on failure the session holds no presentation.
    ///
    /// # Errors
    ///
    /// [`SessionError::Input`] on an invalid URL, [`SessionError::Prove`]
    /// when the proving call fails.
    pub async fn prove(
        &mut self,
        target_url: &str,
        credential: Option<&str>,
    ) -> Result<&Presentation, SessionError> {
        let url = parse_target_url(target_url)?;

        self.presentation = None;
        self.state = SessionState::Proving;

        let request = ProveRequest {
            url: target_url.trim().to_string(),
            headers: build_headers(&url, credential),
        };

        let started = Instant::now();
        match self.prover.prove(&request).await {
            Ok(presentation) => {
                self.transition(Stage::Prove, started, SessionState::Proved, None);
                Ok(self.presentation.insert(presentation))
            }
            Err(err) => {
                self.transition(
                    Stage::Prove,
                    started,
                    SessionState::Failed(Stage::Prove),
                    Some(&err),
                );
                Err(err.into())
            }
        }
    }

    /// Runs the verify phase and extracts the fact for `identity`.
    ///
    /// Requires a retained presentation and a non-blank identity; either
    /// rejection causes no state transition. The presentation survives
    /// verification and extraction failures, so the caller may verify again
    /// (e.g. with a corrected identity) without re-proving.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingPresentation`] / [`SessionError::EmptyIdentity`]
    /// on guard rejections, [`SessionError::Verify`] and
    /// [`SessionError::Extract`] for phase failures.
    pub async fn verify(&mut self, identity: &str) -> Result<ContributionFact, SessionError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(SessionError::EmptyIdentity);
        }
        let Some(presentation) = self.presentation.as_ref() else {
            return Err(SessionError::MissingPresentation);
        };

        self.state = SessionState::Verifying;

        let started = Instant::now();
        let envelope = match self.verifier.verify(presentation).await {
            Ok(envelope) => envelope,
            Err(err) => {
                self.transition(
                    Stage::Verify,
                    started,
                    SessionState::Failed(Stage::Verify),
                    Some(&err),
                );
                return Err(err.into());
            }
        };

        match extract_contribution(&envelope, identity) {
            Ok(fact) => {
                self.transition(Stage::Verify, started, SessionState::Verified, None);
                Ok(fact)
            }
            Err(err) => {
                self.transition(
                    Stage::Extract,
                    started,
                    SessionState::Failed(Stage::Extract),
                    Some(&err),
                );
                Err(err.into())
            }
        }
    }

    /// Records a state transition and emits the structured event consumed by
    /// whatever subscriber is installed (stage, duration, outcome).
    fn transition(
        &mut self,
        stage: Stage,
        started: Instant,
        next: SessionState,
        failure: Option<&dyn std::error::Error>,
    ) {
        self.state = next;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match failure {
            None => {
                tracing::info!(stage = %stage, duration_ms, outcome = "ok", "session transition");
            }
            Some(err) => {
                tracing::warn!(
                    stage = %stage,
                    duration_ms,
                    outcome = "failed",
                    error = %err,
                    "session transition"
                );
            }
        }
    }
}
