//! Error types for the prove and verify phases

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from one proving call
#[derive(Debug, Error)]
pub enum ProveError {
    /// The proving service answered with a non-success status
    #[error("proving service returned {status}: {body}")]
    Service {
        /// Status the proving service returned
        status: StatusCode,
        /// Response body read as text
        body: String,
    },

    /// The request never completed (connection reset, DNS failure, ...)
    #[error("proving service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proving service answered 2xx but the body is not valid JSON
    #[error("proving service returned malformed JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Errors from one verification call
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The deadline elapsed before a response arrived
    #[error("verification timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The verification service answered with a non-success status
    #[error("verification service returned {status}: {body}")]
    Service {
        /// Status the verification service returned
        status: StatusCode,
        /// Response body read as text
        body: String,
    },

    /// The request never completed
    #[error("verification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The verification service answered 2xx but the body is not a valid envelope
    #[error("verification service returned malformed JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Rejections of a caller-supplied target URL, raised before any network call
#[derive(Debug, Error)]
pub enum TargetUrlError {
    /// The URL was empty or whitespace
    #[error("target URL must not be empty")]
    Empty,

    /// The URL did not parse
    #[error("target URL is not a valid URL: {0}")]
    Invalid(#[from] url::ParseError),

    /// The URL parsed but is not http or https
    #[error("target URL must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}
