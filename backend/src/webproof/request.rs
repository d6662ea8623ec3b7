use std::sync::LazyLock;

use reqwest::Client;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Shared HTTP client with connection pooling for all web-prover requests.
///
/// Deliberately built without a global timeout: the proving call uses an
/// optional per-request timeout and the verification call runs under its own
/// deadline, so a pool-wide bound would only get in their way.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
        .user_agent(format!("webproof-backend/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// Returns the shared pooled client.
pub fn http_client() -> &'static Client {
    &HTTP_CLIENT
}
