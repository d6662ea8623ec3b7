//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

/// Default base URL of the vlayer web-prover API
const DEFAULT_WEB_PROVER_BASE_URL: &str = "https://web-prover.vlayer.xyz/api/v1";

/// Default deadline for one verification call, in seconds.
/// Must stay strictly below the router's 90 s hard request cap so the
/// cooperative cancellation fires before the outer timeout does.
const DEFAULT_VERIFY_DEADLINE_SECS: u64 = 85;

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Base URL of the web-prover API, overridable via `WEB_PROVER_BASE_URL`
    #[must_use]
    pub fn web_prover_base_url(&self) -> String {
        env::var("WEB_PROVER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_WEB_PROVER_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Full URL of the proving endpoint
    #[must_use]
    pub fn prove_endpoint(&self) -> String {
        format!("{}/prove", self.web_prover_base_url())
    }

    /// Full URL of the verification endpoint
    #[must_use]
    pub fn verify_endpoint(&self) -> String {
        format!("{}/verify", self.web_prover_base_url())
    }

    /// Client id attached to verification calls as `x-client-id`
    ///
    /// # Panics
    ///
    /// Panics in production and staging if `VLAYER_CLIENT_ID` is not set
    #[must_use]
    pub fn verifier_client_id(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("VLAYER_CLIENT_ID")
                .expect("VLAYER_CLIENT_ID environment variable is not set"),
            Self::Development => {
                env::var("VLAYER_CLIENT_ID").unwrap_or_else(|_| "local-dev-client".to_string())
            }
        }
    }

    /// Bearer token attached to verification calls
    ///
    /// # Panics
    ///
    /// Panics in production and staging if `VLAYER_API_TOKEN` is not set
    #[must_use]
    pub fn verifier_api_token(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("VLAYER_API_TOKEN")
                .expect("VLAYER_API_TOKEN environment variable is not set"),
            Self::Development => {
                env::var("VLAYER_API_TOKEN").unwrap_or_else(|_| "local-dev-token".to_string())
            }
        }
    }

    /// Optional timeout for one proving call, from `PROVE_TIMEOUT_SECS`.
    ///
    /// `None` leaves the proving call on the transport's own default; the
    /// observed upstream keeps its own latency bound, so this is a knob
    /// rather than a hardcoded value.
    #[must_use]
    pub fn prove_timeout(&self) -> Option<Duration> {
        env::var("PROVE_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Deadline for one verification call, from `VERIFY_DEADLINE_SECS`
    #[must_use]
    pub fn verify_deadline(&self) -> Duration {
        let secs = env::var("VERIFY_DEADLINE_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_VERIFY_DEADLINE_SECS);
        Duration::from_secs(secs)
    }

    /// Default tracing filter when `RUST_LOG` is not set
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Production | Self::Staging => "info",
            Self::Development => "debug",
        }
    }
}
