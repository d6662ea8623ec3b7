//! Server setup and lifecycle

use std::sync::Arc;
use std::time::Duration;

use aide::openapi::OpenApi;
use axum::Extension;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::routes;
use crate::types::Environment;
use crate::webproof::{ProverClient, VerifierClient};

/// Hard cap on any request; the verification deadline (85 s default) must
/// stay below this so a slow upstream surfaces as a 408 from the verify
/// client rather than this layer severing the response.
const REQUEST_HARD_CAP: Duration = Duration::from_secs(90);

/// Starts the server with the given environment and clients
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    prover: Arc<ProverClient>,
    verifier: Arc<VerifierClient>,
) -> anyhow::Result<()> {
    let mut openapi = OpenApi::default();

    let router = routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(prover))
        .layer(Extension(verifier))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_HARD_CAP));

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8000), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Web-Proof Gateway started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
