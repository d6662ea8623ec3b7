//! The prove/verify API surface consumed by the UI

pub mod contribution;
pub mod prove;
pub mod verify;

use aide::axum::{routing::post, ApiRouter};

/// Creates the API router
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/api/prove", post(prove::handler))
        .api_route("/api/verify", post(verify::handler))
        .api_route("/api/contribution", post(contribution::handler))
}
