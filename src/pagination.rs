//! Pagination metadata and the concurrent "fetch every page" algorithm.

use std::future::Future;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::response::HcloudResponse;

/// Position of one page within a paginated listing (`meta.pagination`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
    #[serde(default)]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
    /// Last page number; may be null when the total is unknown.
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total_entries: Option<u64>,
}

impl Pagination {
    /// Whether a page follows this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl ListParams {
    /// Create pagination params for a specific page.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

/// Fetch every page of a listing.
///
/// Page 1 is fetched first to learn `last_page`. Pages `2..=last_page` are
/// then requested concurrently and their items appended in page order,
/// whatever order the requests complete in. The first failing page fails
/// the whole call and no partial result is returned.
///
/// # Example
///
/// ```no_run
/// use hcloud_sdk::{paginate, HetznerClient, List};
///
/// # async fn example(client: &HetznerClient) -> hcloud_sdk::Result<()> {
/// let servers = paginate(|page| client.servers().list(page, 50)).await?;
/// println!("{} servers", servers.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the error of the first page request that fails.
pub async fn paginate<T, F, Fut>(fetch: F) -> Result<Vec<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<HcloudResponse<Vec<T>>>>,
{
    let first = fetch(1).await?;
    let last_page = first.last_page();
    let mut items = first.result;

    if last_page <= 1 {
        return Ok(items);
    }

    tracing::debug!(last_page, "Fetching remaining pages concurrently");

    let rest = try_join_all((2..=last_page).map(&fetch)).await?;
    for page in rest {
        items.extend(page.result);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    use crate::error::HcloudError;

    fn page(items: Vec<u32>, page: u32, last_page: Option<u32>) -> HcloudResponse<Vec<u32>> {
        HcloudResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            result: items,
            pagination: Some(Pagination {
                page,
                per_page: 2,
                previous_page: page.checked_sub(1).filter(|p| *p > 0),
                next_page: last_page.filter(|last| page < *last).map(|_| page + 1),
                last_page,
                total_entries: None,
            }),
        }
    }

    #[test]
    fn test_list_params_query_string() {
        let query = serde_qs::to_string(&ListParams::new(3, 50)).unwrap();
        assert_eq!(query, "page=3&per_page=50");
    }

    #[test]
    fn test_pagination_deserialize_with_null_last_page() {
        let pagination: Pagination = serde_json::from_str(
            r#"{"page":1,"per_page":25,"previous_page":null,"next_page":2,"last_page":null,"total_entries":null}"#,
        )
        .unwrap();

        assert_eq!(pagination.last_page, None);
        assert!(pagination.has_more());
    }

    #[tokio::test]
    async fn test_single_page_issues_one_request() {
        let calls = AtomicUsize::new(0);

        let items = paginate(|n| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(page(vec![1, 2], n, Some(1))) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_pagination_is_single_page() {
        let calls = AtomicUsize::new(0);

        let items = paginate(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(HcloudResponse {
                    status: StatusCode::OK,
                    headers: HeaderMap::new(),
                    result: vec![7],
                    pagination: None,
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![7]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pages_merged_in_order_despite_completion_order() {
        let requested = Mutex::new(Vec::new());
        let completed = Mutex::new(Vec::new());

        let items = paginate(|n| {
            requested.lock().unwrap().push(n);
            let completed = &completed;
            async move {
                // Page 2 finishes last.
                if n == 2 {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
                completed.lock().unwrap().push(n);
                Ok(page(vec![n * 10, n * 10 + 1], n, Some(3)))
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![10, 11, 20, 21, 30, 31]);
        assert_eq!(*requested.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(*completed.lock().unwrap(), vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn test_failing_page_fails_whole_listing() {
        let calls = AtomicUsize::new(0);

        let result = paginate(|n| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 3 {
                    return Err(HcloudError::ConfigMissing("page 3".to_string()));
                }
                Ok(page(vec![n], n, Some(3)))
            }
        })
        .await;

        match result {
            Err(HcloudError::ConfigMissing(msg)) => assert_eq!(msg, "page 3"),
            other => panic!("expected page 3 failure, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_page_failure_stops_early() {
        let calls = AtomicUsize::new(0);

        let result: Result<Vec<u32>> = paginate(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(HcloudError::ConfigMissing("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
