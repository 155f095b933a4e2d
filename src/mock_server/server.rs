//! Mock Hetzner Cloud API server.
//!
//! Provides an axum-based HTTP server that simulates the API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Hetzner Cloud API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}/v1/", addr),
            handle,
            state: shared_state,
        }
    }

    /// Base URL to pass to [`ClientConfig::base_url`](crate::ClientConfig::base_url).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for server in scenario.servers {
            state = state.with_server(server);
        }
        for firewall in scenario.firewalls {
            state = state.with_firewall(firewall);
        }
        for network in scenario.networks {
            state = state.with_network(network);
        }
        for key in scenario.ssh_keys {
            state = state.with_ssh_key(key);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            // Action routes
            .route("/actions/:id", get(handlers::get_action))
            // Server routes
            .route("/servers", get(handlers::list_servers))
            .route(
                "/servers/:id",
                get(handlers::get_server).delete(handlers::delete_server),
            )
            .route(
                "/servers/:id/actions/poweron",
                post(handlers::power_on_server),
            )
            .route(
                "/servers/:id/actions/poweroff",
                post(handlers::power_off_server),
            )
            // Firewall routes
            .route("/firewalls", get(handlers::list_firewalls))
            .route("/firewalls/:id", get(handlers::get_firewall))
            // Network routes
            .route("/networks", get(handlers::list_networks))
            .route("/networks/:id", get(handlers::get_network))
            // SSH key routes
            .route(
                "/ssh_keys",
                get(handlers::list_ssh_keys).post(handlers::create_ssh_key),
            )
            .route(
                "/ssh_keys/:id",
                get(handlers::get_ssh_key).delete(handlers::delete_ssh_key),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::require_token,
            ));

        Router::new()
            .nest("/v1", api)
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::{Get, HetznerClient, List};

    fn client(server: &MockServer) -> HetznerClient {
        HetznerClient::builder("test-token")
            .base_url(server.url())
            .connect_retries(0)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let response = reqwest::Client::new()
            .get(server.url().replace("/v1/", "/health"))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_requires_token() {
        let state = MockState::new().with_required_token("secret").shared();
        let app = MockServer::create_router(state);

        let response = app
            .clone()
            .oneshot(Request::get("/v1/servers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "unauthorized");

        let response = app
            .oneshot(
                Request::get("/v1/servers")
                    .header("authorization", "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_server_with_client() {
        let server = MockServer::start().await;

        let response = client(&server)
            .servers()
            .get(1)
            .await
            .expect("Failed to get server");

        assert_eq!(response.result.name, "web-1");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_servers_with_client() {
        let server = MockServer::start().await;

        let page = client(&server)
            .servers()
            .list(1, 2)
            .await
            .expect("Failed to list servers");

        assert_eq!(page.result.len(), 2);
        let pagination = page.pagination.expect("pagination metadata");
        assert_eq!(pagination.last_page, Some(2));
        assert_eq!(pagination.total_entries, Some(3));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;

        let err = client(&server).ssh_keys().get(1).await.unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new().with_ssh_key(Fixtures::ssh_key(5, "deploy"));

        let server = MockServer::with_state(state).await;

        let key = client(&server)
            .ssh_keys()
            .get(5)
            .await
            .expect("Failed to get key")
            .result;

        assert_eq!(key.name, "deploy");

        server.shutdown().await;
    }
}
