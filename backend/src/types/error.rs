//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::contributions::ExtractError;
use crate::session::SessionError;
use crate::webproof::{ProveError, TargetUrlError, VerifyError};

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub error: String,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(
        status: StatusCode,
        code: &'static str,
        error: impl Into<String>,
        allow_retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry,
                code,
                error: error.into(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => {
                tracing::warn!("Client error: {} - {}", self.inner.code, self.inner.error);
            }
            500..=599 => {
                tracing::error!("Server error: {} - {}", self.inner.code, self.inner.error);
            }
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Target URL rejections happen before any network call
impl From<TargetUrlError> for AppError {
    fn from(err: TargetUrlError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_url", err.to_string(), false)
    }
}

/// Any prove-phase failure surfaces as a server error; the caller may
/// trigger a fresh cycle
impl From<ProveError> for AppError {
    fn from(err: ProveError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "prove_failed",
            err.to_string(),
            true,
        )
    }
}

/// Verify-phase failures: the deadline gets its own status so callers can
/// offer a retry, everything else is a server error
impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        match &err {
            VerifyError::Timeout(_) => Self::new(
                StatusCode::REQUEST_TIMEOUT,
                "verify_timeout",
                err.to_string(),
                true,
            ),
            VerifyError::Service { .. } | VerifyError::Transport(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "verify_failed",
                err.to_string(),
                true,
            ),
            VerifyError::InvalidResponse(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "verify_failed",
                err.to_string(),
                false,
            ),
        }
    }
}

/// Extraction failures map to upstream-shaped statuses; `IdentityNotFound`
/// keeps the available logins in the message so the caller can correct the
/// identity
impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match &err {
            ExtractError::AsyncPending => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "upstream_pending",
                err.to_string(),
                true,
            ),
            ExtractError::NoBody => Self::new(
                StatusCode::BAD_GATEWAY,
                "no_response_body",
                err.to_string(),
                false,
            ),
            ExtractError::MalformedBody(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "malformed_body",
                err.to_string(),
                false,
            ),
            ExtractError::IdentityNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "identity_not_found",
                err.to_string(),
                false,
            ),
        }
    }
}

/// Session errors delegate to the originating phase; guard rejections are
/// client errors
impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Input(inner) => inner.into(),
            SessionError::Prove(inner) => inner.into(),
            SessionError::Verify(inner) => inner.into(),
            SessionError::Extract(inner) => inner.into(),
            SessionError::MissingPresentation | SessionError::EmptyIdentity => Self::new(
                StatusCode::BAD_REQUEST,
                "invalid_input",
                err.to_string(),
                false,
            ),
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_timeout_maps_to_408() {
        let err: AppError = VerifyError::Timeout(std::time::Duration::from_secs(85)).into();
        assert_eq!(err.status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.inner.code, "verify_timeout");
        assert!(err.inner.allow_retry);
    }

    #[test]
    fn test_identity_not_found_keeps_available_logins_in_message() {
        let err: AppError = ExtractError::IdentityNotFound {
            identity: "erin".to_string(),
            available: vec!["bob".to_string(), "carol".to_string()],
        }
        .into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.inner.error.contains("bob, carol"));
    }

    #[test]
    fn test_guard_rejections_are_client_errors() {
        let err: AppError = SessionError::EmptyIdentity.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(!err.inner.allow_retry);
    }
}
