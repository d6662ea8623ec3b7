//! Web-proof contribution gateway
//!
//! Obtains a cryptographic attestation that a GitHub contributors endpoint
//! returned particular content (via the vlayer web-prover service), verifies
//! that attestation, and extracts a contributor's commit count from the
//! verified payload.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Contribution fact extraction from verified payloads
pub mod contributions;

/// Handler modules
pub mod routes;

/// Server setup and lifecycle
pub mod server;

/// Prove/verify cycle orchestration
pub mod session;

/// Environment configuration and universal error handling
pub mod types;

/// Clients for the external proving and verification services
pub mod webproof;
