//! Tests for concurrent pagination through the `List` trait.

use std::time::Duration;

use hcloud_sdk::{HetznerClient, List, DEFAULT_LIST_ALL_PAGE_SIZE};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

fn client(uri: &str) -> HetznerClient {
    HetznerClient::builder("test-token")
        .base_url(uri)
        .connect_retries(0)
        .build()
        .unwrap()
}

fn ssh_key_json(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("key-{id}"),
        "fingerprint": "00:11:22",
        "public_key": "ssh-ed25519 AAAA",
        "created": "2024-01-01T00:00:00+00:00"
    })
}

fn page_json(ids: &[u64], page: u32, last_page: u32) -> serde_json::Value {
    let previous_page = (page > 1).then(|| page - 1);
    let next_page = (page < last_page).then(|| page + 1);

    serde_json::json!({
        "ssh_keys": ids.iter().map(|&id| ssh_key_json(id)).collect::<Vec<_>>(),
        "meta": {
            "pagination": {
                "page": page,
                "per_page": 2,
                "previous_page": previous_page,
                "next_page": next_page,
                "last_page": last_page,
                "total_entries": 5
            }
        }
    })
}

async fn mount_page(
    server: &MockServer,
    page: u32,
    response: ResponseTemplate,
    expected_calls: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path("/ssh_keys"))
        .and(query_param("page", page.to_string()))
        .and(query_param("per_page", "2"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_all_single_page_makes_one_request() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_json(page_json(&[1, 2], 1, 1)),
        1,
    )
    .await;

    let keys = client(&mock_server.uri())
        .ssh_keys()
        .list_all(2)
        .await
        .expect("list_all should succeed");

    assert_eq!(keys.iter().map(|k| k.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[tokio::test]
async fn test_list_all_keeps_page_order_when_pages_finish_out_of_order() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_json(page_json(&[1, 2], 1, 3)),
        1,
    )
    .await;
    // Page 2 answers last.
    mount_page(
        &mock_server,
        2,
        ResponseTemplate::new(200)
            .set_body_json(page_json(&[3, 4], 2, 3))
            .set_delay(Duration::from_millis(300)),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        3,
        ResponseTemplate::new(200).set_body_json(page_json(&[5], 3, 3)),
        1,
    )
    .await;

    let keys = client(&mock_server.uri())
        .ssh_keys()
        .list_all(2)
        .await
        .expect("list_all should succeed");

    assert_eq!(
        keys.iter().map(|k| k.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
}

#[tokio::test]
async fn test_list_all_fetches_remaining_pages_concurrently() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_json(page_json(&[1], 1, 4)),
        1,
    )
    .await;
    for page in 2..=4 {
        mount_page(
            &mock_server,
            page,
            ResponseTemplate::new(200)
                .set_body_json(page_json(&[u64::from(page)], page, 4))
                .set_delay(Duration::from_millis(400)),
            1,
        )
        .await;
    }

    let started = std::time::Instant::now();
    let keys = client(&mock_server.uri())
        .ssh_keys()
        .list_all(2)
        .await
        .unwrap();

    assert_eq!(keys.len(), 4);
    // Three delayed pages in sequence would take at least 1.2s.
    assert!(started.elapsed() < Duration::from_millis(1100));
}

#[tokio::test]
async fn test_list_all_fails_when_a_later_page_fails() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_json(page_json(&[1, 2], 1, 3)),
        1,
    )
    .await;
    // Page 2 may be abandoned once page 3 has failed.
    mount_page(
        &mock_server,
        2,
        ResponseTemplate::new(200).set_body_json(page_json(&[3, 4], 2, 3)),
        0..=1,
    )
    .await;
    mount_page(&mock_server, 3, ResponseTemplate::new(503), 1).await;

    let err = client(&mock_server.uri())
        .ssh_keys()
        .list_all(2)
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert!(err.to_string().contains("page=3"));
}

#[tokio::test]
async fn test_list_sends_page_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", DEFAULT_LIST_ALL_PAGE_SIZE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"servers": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server.uri())
        .servers()
        .list(2, DEFAULT_LIST_ALL_PAGE_SIZE)
        .await
        .unwrap();

    assert!(response.result.is_empty());
    assert!(response.pagination.is_none());
}
