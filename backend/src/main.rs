use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};
use webproof_backend::{
    server,
    types::Environment,
    webproof::{ProverClient, VerifierClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, regular format for development
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(filter).init();
        }
    }

    let prover = Arc::new(ProverClient::new(
        environment.prove_endpoint(),
        environment.prove_timeout(),
    ));
    let verifier = Arc::new(VerifierClient::new(
        environment.verify_endpoint(),
        environment.verifier_client_id(),
        environment.verifier_api_token(),
        environment.verify_deadline(),
    ));

    server::start(environment, prover, verifier).await
}
