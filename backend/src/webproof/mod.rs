//! Clients for the vlayer web-prover service.
//!
//! The web-prover fetches a URL over TLS on the caller's behalf and produces
//! a *presentation*: an opaque artifact cryptographically binding the HTTP
//! response to its proof of authenticity. A second endpoint validates a
//! presentation and returns the underlying response data.
//!
//! # Components
//! - `headers`: outbound header construction for recognized target hosts
//! - `prover`: submits a fetch request and returns the presentation
//! - `verifier`: submits a presentation and returns the verified envelope
//! - `error`: per-phase error types
//! - `request`: shared HTTP client with connection pooling (internal)

pub mod error;
pub mod headers;
pub mod prover;
pub mod types;
pub mod verifier;

/// Shared reqwest client used by both the prover and verifier clients.
mod request;

pub use error::{ProveError, TargetUrlError, VerifyError};
pub use prover::ProverClient;
pub use types::{Presentation, ProveRequest, ProvenResponse, VerifiedEnvelope};
pub use verifier::VerifierClient;
