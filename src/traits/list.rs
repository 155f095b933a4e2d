//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::pagination::paginate;
use crate::response::HcloudResponse;

/// Default page size for a single `list` call.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Default page size used by `list_all`.
pub const DEFAULT_LIST_ALL_PAGE_SIZE: u32 = 50;

/// List entities with pagination support.
///
/// # Example
///
/// ```no_run
/// use hcloud_sdk::{HetznerClient, List, DEFAULT_LIST_ALL_PAGE_SIZE};
///
/// # async fn example() -> hcloud_sdk::Result<()> {
/// let client = HetznerClient::from_env()?;
///
/// // Fetch a single page
/// let page = client.ssh_keys().list(1, 25).await?;
///
/// // Fetch all pages
/// let all_keys = client.ssh_keys().list_all(DEFAULT_LIST_ALL_PAGE_SIZE).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait List: Send + Sync {
    /// The entity type listed.
    type Item: Send;

    /// Fetch one page.
    ///
    /// # Arguments
    ///
    /// * `page` - Page number (1-indexed)
    /// * `per_page` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(&self, page: u32, per_page: u32) -> Result<HcloudResponse<Vec<Self::Item>>>;

    /// Fetch every page and return the items in page order.
    ///
    /// The first page is fetched alone; the remaining pages are fetched
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first error of any page request; no partial results.
    async fn list_all(&self, per_page: u32) -> Result<Vec<Self::Item>> {
        paginate(|page| self.list(page, per_page)).await
    }
}
