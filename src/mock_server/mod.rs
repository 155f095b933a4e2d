//! Mock Hetzner Cloud API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the API
//! for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests:
//! started actions progress on every fetch, listings are paginated and
//! deleted resources disappear.
//!
//! # Example
//!
//! ```no_run
//! use hcloud_sdk::mock_server::MockServer;
//! use hcloud_sdk::{Get, HetznerClient};
//!
//! # async fn example() {
//! let server = MockServer::start().await;
//! let client = HetznerClient::builder("test-token")
//!     .base_url(server.url())
//!     .build()
//!     .unwrap();
//!
//! // Server comes with default fixtures
//! let server_1 = client.servers().get(1).await.unwrap().result;
//! assert_eq!(server_1.name, "web-1");
//!
//! server.shutdown().await;
//! # }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockAction, MockState};
