//! Shared helpers for the integration suites: local mock upstreams standing
//! in for the web-prover service, and a router wired against them.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aide::openapi::OpenApi;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use tokio::net::TcpListener;
use webproof_backend::{
    routes,
    types::Environment,
    webproof::{ProverClient, VerifierClient},
};

/// What the mock upstream answers with
#[derive(Clone)]
pub struct UpstreamBehavior {
    pub status: StatusCode,
    pub body: serde_json::Value,
    /// Applied before answering; used to trip the verify deadline
    pub delay: Option<Duration>,
}

impl UpstreamBehavior {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: None,
        }
    }
}

/// One request the mock upstream received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub client_id: Option<String>,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// A mock upstream bound to an ephemeral local port
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

type UpstreamState = (UpstreamBehavior, Arc<Mutex<Vec<RecordedRequest>>>);

async fn record_and_respond(
    State((behavior, requests)): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    };
    requests.lock().unwrap().push(RecordedRequest {
        client_id: header("x-client-id"),
        authorization: header("authorization"),
        body,
    });

    if let Some(delay) = behavior.delay {
        tokio::time::sleep(delay).await;
    }
    (behavior.status, Json(behavior.body.clone()))
}

/// Spawns a mock upstream answering every POST with the given behavior
pub async fn spawn_upstream(behavior: UpstreamBehavior) -> MockUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/{*path}", post(record_and_respond))
        .with_state((behavior, requests.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, requests }
}

/// Builds the real router wired against the given clients
pub fn test_router(prover: Arc<ProverClient>, verifier: Arc<VerifierClient>) -> axum::Router {
    let mut openapi = OpenApi::default();
    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(Environment::Development))
        .layer(Extension(prover))
        .layer(Extension(verifier))
}

/// A prover client pointed at a mock upstream
pub fn prover_for(upstream: &MockUpstream) -> Arc<ProverClient> {
    Arc::new(ProverClient::new(upstream.url("/prove"), None))
}

/// A verifier client pointed at a mock upstream
pub fn verifier_for(upstream: &MockUpstream, deadline: Duration) -> Arc<VerifierClient> {
    Arc::new(VerifierClient::new(
        upstream.url("/verify"),
        "test-client-id".to_string(),
        "test-api-token".to_string(),
        deadline,
    ))
}

/// Parse response body to JSON
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// A contributors payload as the verification service returns it: the body
/// is a JSON string nested inside the envelope
pub fn contributors_envelope(status: u16, contributors: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "response": {
            "status": status,
            "body": contributors.to_string(),
        }
    })
}
