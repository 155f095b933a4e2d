//! Hetzner Cloud API client.
//!
//! Owns configuration and the shared transport, and hands out one façade
//! per resource family.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::{HcloudError, Result};
use crate::resources::{
    ActionsResource, FirewallsResource, NetworksResource, ServersResource, SshKeysResource,
};
use crate::retry_after::{InMemoryRetryAfterCache, RetryAfterCache};
use crate::transport::{Transport, TransportSettings};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.hetzner.cloud/v1/";

/// Default time allowed to establish a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default time allowed for a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after a connection failure.
pub const DEFAULT_CONNECT_RETRIES: u32 = 3;

/// Default number of retries after a `429` with `Retry-After`.
pub const DEFAULT_RETRY_AFTER_RETRIES: u32 = 2;

const TOKEN_ENV: &str = "HCLOUD_TOKEN";
const API_URL_ENV: &str = "HCLOUD_API_URL";

/// Hetzner Cloud API client.
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the rate-limit cache.
///
/// # Example
///
/// ```no_run
/// use hcloud_sdk::{HetznerClient, List};
///
/// # async fn example() -> hcloud_sdk::Result<()> {
/// // Create from environment variables
/// let client = HetznerClient::from_env()?;
///
/// // Or configure manually
/// let client = HetznerClient::builder("your-api-token")
///     .timeout(std::time::Duration::from_secs(60))
///     .build()?;
///
/// let servers = client.servers().list_all(50).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HetznerClient {
    transport: Arc<Transport>,
    actions: ActionsResource,
    servers: ServersResource,
    firewalls: FirewallsResource,
    networks: NetworksResource,
    ssh_keys: SshKeysResource,
}

impl std::fmt::Debug for HetznerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HetznerClient")
            .field("base_url", &self.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl HetznerClient {
    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder(token).build()
    }

    /// Start configuring a client.
    pub fn builder(token: impl Into<String>) -> ClientConfig {
        ClientConfig::new(token)
    }

    /// Create a client from environment variables.
    ///
    /// Uses `HCLOUD_TOKEN` for authentication and optionally
    /// `HCLOUD_API_URL` for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `HCLOUD_TOKEN` is not set or the URL is invalid.
    pub fn from_env() -> Result<Self> {
        let token = env::var(TOKEN_ENV).map_err(|_| {
            HcloudError::ConfigMissing(format!("{TOKEN_ENV} environment variable not set"))
        })?;

        let mut config = Self::builder(token);
        if let Ok(base_url) = env::var(API_URL_ENV) {
            config = config.base_url(base_url);
        }

        config.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    pub fn actions(&self) -> &ActionsResource {
        &self.actions
    }

    pub fn servers(&self) -> &ServersResource {
        &self.servers
    }

    pub fn firewalls(&self) -> &FirewallsResource {
        &self.firewalls
    }

    pub fn networks(&self) -> &NetworksResource {
        &self.networks
    }

    pub fn ssh_keys(&self) -> &SshKeysResource {
        &self.ssh_keys
    }
}

/// Client configuration, used as a builder.
#[derive(Clone)]
pub struct ClientConfig {
    token: String,
    base_url: String,
    connect_timeout: Duration,
    timeout: Duration,
    connect_retries: u32,
    retry_after_retries: u32,
    retry_after_cache: Arc<dyn RetryAfterCache>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("connect_retries", &self.connect_retries)
            .field("retry_after_retries", &self.retry_after_retries)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            connect_retries: DEFAULT_CONNECT_RETRIES,
            retry_after_retries: DEFAULT_RETRY_AFTER_RETRIES,
            retry_after_cache: Arc::new(InMemoryRetryAfterCache::new()),
        }
    }

    /// API base URL. A trailing slash is added when missing.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Total time allowed for each individual request.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries after a connection failure. `0` disables retrying.
    #[must_use]
    pub fn connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }

    /// Retries after a `429` response carrying `Retry-After`.
    #[must_use]
    pub fn retry_after_retries(mut self, retries: u32) -> Self {
        self.retry_after_retries = retries;
        self
    }

    /// Store for `Retry-After` hints, e.g. one shared between clients.
    #[must_use]
    pub fn retry_after_cache(mut self, cache: Arc<dyn RetryAfterCache>) -> Self {
        self.retry_after_cache = cache;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the token is empty or
    /// not usable as a header value, or the HTTP client cannot be built.
    pub fn build(self) -> Result<HetznerClient> {
        if self.token.trim().is_empty() {
            return Err(HcloudError::ConfigMissing("API token is empty".to_string()));
        }

        // Ensure base URL ends with /
        let base_url = if self.base_url.ends_with('/') {
            self.base_url
        } else {
            format!("{}/", self.base_url)
        };
        let base_url = Url::parse(&base_url)?;

        let transport = Arc::new(Transport::new(TransportSettings {
            base_url,
            token: self.token,
            connect_timeout: self.connect_timeout,
            timeout: self.timeout,
            connect_retries: self.connect_retries,
            retry_after_retries: self.retry_after_retries,
            retry_after_cache: self.retry_after_cache,
        })?);

        Ok(HetznerClient {
            actions: ActionsResource::new(Arc::clone(&transport)),
            servers: ServersResource::new(Arc::clone(&transport)),
            firewalls: FirewallsResource::new(Arc::clone(&transport)),
            networks: NetworksResource::new(Arc::clone(&transport)),
            ssh_keys: SshKeysResource::new(Arc::clone(&transport)),
            transport,
        })
    }
}
