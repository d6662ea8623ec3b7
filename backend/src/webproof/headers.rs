//! Outbound header construction for proved fetches.
//!
//! The proving service replays whatever headers it is handed, so the exact
//! set matters: GitHub's contributors endpoints answer JSON only to
//! browser-looking requests, and private repositories additionally need a
//! bearer token.

use url::Url;

use super::error::TargetUrlError;

/// User-Agent replayed for GitHub targets; the endpoint rejects bare clients
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

const GITHUB_HOST: &str = "github.com";

/// Builds the header set the proving service should replay for `url`.
///
/// For `github.com` targets this is a fixed User-Agent, `Accept:
/// application/json`, and, when a non-empty `credential` is given,
/// `Authorization: Bearer <credential>` as the last entry. Every other host
/// gets an empty set. Pure; URL validity is the caller's concern.
#[must_use]
pub fn build_headers(url: &Url, credential: Option<&str>) -> Vec<String> {
    let mut headers = Vec::new();

    if url.host_str() == Some(GITHUB_HOST) {
        headers.push(format!("User-Agent: {BROWSER_USER_AGENT}"));
        headers.push("Accept: application/json".to_string());

        if let Some(token) = credential.map(str::trim).filter(|token| !token.is_empty()) {
            headers.push(format!("Authorization: Bearer {token}"));
        }
    }

    headers
}

/// Validates a caller-supplied target URL.
///
/// Rejects empty input, unparseable URLs, and non-http(s) schemes. This is
/// the input-validation gate applied before any network call.
///
/// # Errors
///
/// Returns a [`TargetUrlError`] describing the rejection.
pub fn parse_target_url(raw: &str) -> Result<Url, TargetUrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::Empty);
    }

    let url = Url::parse(trimmed)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TargetUrlError::UnsupportedScheme(other.to_string())),
    }
}
