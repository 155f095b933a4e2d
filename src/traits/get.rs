//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::response::HcloudResponse;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```no_run
/// use hcloud_sdk::{Get, HetznerClient};
///
/// # async fn example() -> hcloud_sdk::Result<()> {
/// let client = HetznerClient::from_env()?;
/// let server = client.servers().get(42).await?.result;
/// println!("{} is {}", server.name, server.status);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Get: Send + Sync {
    /// The entity type returned.
    type Output: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns a client error if the entity does not exist, or any
    /// transport or decode error.
    async fn get(&self, id: u64) -> Result<HcloudResponse<Self::Output>>;
}
