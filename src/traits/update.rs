//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::response::HcloudResponse;

/// Update an existing entity.
///
/// # Example
///
/// ```no_run
/// use hcloud_sdk::{HetznerClient, Update, UpdateFirewallParams};
///
/// # async fn example() -> hcloud_sdk::Result<()> {
/// let client = HetznerClient::from_env()?;
/// let updated = client
///     .firewalls()
///     .update(
///         38,
///         UpdateFirewallParams {
///             name: Some("web-frontend".to_string()),
///             ..Default::default()
///         },
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Update: Send + Sync {
    /// Parameters for the update.
    type Params: Send + 'static;

    /// The updated entity type.
    type Output: Send;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(&self, id: u64, params: Self::Params) -> Result<HcloudResponse<Self::Output>>;
}
