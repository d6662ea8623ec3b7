//! Wire types exchanged with the web-prover service

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A fetch request submitted to the proving endpoint.
///
/// `headers` is replayed by the proving service verbatim and in order; no
/// deduplication or normalization happens on this side.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProveRequest {
    /// Absolute http(s) URL the proving service should fetch
    pub url: String,
    /// Outbound headers as `Name: Value` strings, order preserved
    #[serde(default)]
    pub headers: Vec<String>,
}

/// Opaque presentation artifact produced by the proving service.
///
/// Passed through to verification unchanged; none of its internal fields are
/// inspected here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Presentation(
    /// The artifact exactly as the proving service returned it
    pub serde_json::Value,
);

/// Envelope returned by the verification endpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VerifiedEnvelope {
    /// The proven HTTP response
    pub response: ProvenResponse,
}

/// The HTTP response whose authenticity the presentation attests to
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProvenResponse {
    /// Status code the target returned to the proving service
    pub status: u16,
    /// Response body, absent when the target produced none
    #[serde(default)]
    pub body: Option<String>,
    /// Response headers, when the verification service includes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<serde_json::Map<String, serde_json::Value>>,
}
