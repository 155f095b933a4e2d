//! Hetzner Cloud API client library.
//!
//! A typed Rust client for the Hetzner Cloud REST API. Each resource
//! family (servers, firewalls, networks, SSH keys, actions) is reached
//! through a façade on [`HetznerClient`]; shared operations are expressed
//! as the traits [`Get`], [`List`] and [`Update`].
//!
//! # Quick Start
//!
//! ```no_run
//! use hcloud_sdk::{Get, HetznerClient, List, PollOptions};
//!
//! #[tokio::main]
//! async fn main() -> hcloud_sdk::Result<()> {
//!     // Create client from environment variables
//!     let client = HetznerClient::from_env()?;
//!
//!     // List all servers, fetching pages concurrently
//!     let servers = client.servers().list_all(50).await?;
//!     println!("Found {} servers", servers.len());
//!
//!     // Start a server and wait for the action to finish
//!     let action = client.servers().power_on(42).await?.result;
//!     let action = client.actions().poll(action.id, PollOptions::default()).await?;
//!     println!("power on: {:?}", action.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Credentials
//!
//! The API token is only ever sent in the `Authorization` header. Every
//! log line and error message produced by this crate passes through
//! [`obfuscate`], which replaces `Bearer <token>` with
//! [`REDACTED_BEARER`].
//!
//! # Configuration
//!
//! [`HetznerClient::from_env`] reads:
//!
//! - `HCLOUD_TOKEN` (required) - Your API token
//! - `HCLOUD_API_URL` (optional) - Base URL (defaults to `https://api.hetzner.cloud/v1/`)
//!
//! Timeouts, retries and the `Retry-After` store are set with
//! [`HetznerClient::builder`].

mod classify;
mod client;
mod error;
mod models;
mod obfuscate;
mod pagination;
mod poll;
mod response;
mod retry_after;
mod traits;
mod transport;

pub mod resources;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{
    ClientConfig, HetznerClient, DEFAULT_API_URL, DEFAULT_CONNECT_RETRIES,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_RETRY_AFTER_RETRIES, DEFAULT_TIMEOUT,
};
pub use error::{ApiError, HcloudError, HttpFailure, Result};
pub use obfuscate::{obfuscate, RedactedRequest, REDACTED_BEARER};
pub use pagination::{paginate, ListParams, Pagination};
pub use poll::{poll_action, PollOptions, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use response::{decode, Envelope, HcloudResponse};
pub use retry_after::{
    cache_key, InMemoryRetryAfterCache, RetryAfterCache, CACHE_KEY_PREFIX, MAX_RETRY_AFTER,
};

// Re-export traits
pub use traits::{Get, List, Update, DEFAULT_LIST_ALL_PAGE_SIZE, DEFAULT_PAGE_SIZE};

// Re-export resources
pub use resources::{
    ActionsResource, FirewallsResource, NetworksResource, ServersResource, SshKeysResource,
};

// Re-export models
pub use models::{
    // Action types
    Action,
    ActionError,
    ActionResource,
    ActionStatus,
    // Shared types
    Labels,
    Protection,
    // Server types
    AttachToNetworkParams,
    CreateServerParams,
    CreatedServer,
    DnsPtr,
    Image,
    Ipv4,
    Ipv6,
    PublicNet,
    Server,
    ServerFirewall,
    ServerPrivateNet,
    ServerType,
    // Location types
    Datacenter,
    Location,
    // Firewall types
    CreateFirewallParams,
    CreatedFirewall,
    Firewall,
    FirewallResource,
    FirewallResourceLabelSelector,
    FirewallResourceServer,
    FirewallRule,
    FirewallTarget,
    RuleDirection,
    RuleProtocol,
    UpdateFirewallParams,
    // Network types
    CreateNetworkParams,
    Network,
    Route,
    Subnet,
    UpdateNetworkParams,
    // SSH key types
    CreateSshKeyParams,
    SshKey,
};

/// Envelope shapes accepted by [`decode`].
pub mod envelopes {
    pub use crate::response::{
        ActionEnvelope, ActionListEnvelope, CreatedFirewallEnvelope, CreatedServerEnvelope,
        FirewallEnvelope, FirewallListEnvelope, NetworkEnvelope, NetworkListEnvelope,
        ServerEnvelope, ServerListEnvelope, SshKeyEnvelope, SshKeyListEnvelope,
    };
}
