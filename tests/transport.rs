//! Tests for request authentication, error classification and retries.
//!
//! Uses wiremock to script the API and checks what reaches the caller.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use hcloud_sdk::{
    cache_key, Get, HcloudError, HetznerClient, InMemoryRetryAfterCache, List, RetryAfterCache,
    MAX_RETRY_AFTER, REDACTED_BEARER,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "hcloud-test-token-0123456789";

fn client(uri: &str) -> HetznerClient {
    HetznerClient::builder(TOKEN)
        .base_url(uri)
        .connect_retries(0)
        .build()
        .unwrap()
}

fn ssh_key_json(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("key-{id}"),
        "fingerprint": "b7:2f:30:a0:2f:6c:58:6c:21:04:58:61:ba:06:3b:2f",
        "public_key": "ssh-ed25519 AAAA",
        "labels": {},
        "created": "2024-01-01T00:00:00+00:00"
    })
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_bearer_token_and_accept_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ssh_key": ssh_key_json(1)})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server.uri())
        .ssh_keys()
        .get(1)
        .await
        .expect("request should succeed");

    assert_eq!(response.result.id, 1);
    assert_eq!(response.status, reqwest::StatusCode::OK);
}

// =============================================================================
// Error Classification
// =============================================================================

#[tokio::test]
async fn test_404_is_client_error_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {"code": "not_found", "message": "server with ID '99' not found"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri())
        .servers()
        .get(99)
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));

    let message = err.to_string();
    assert!(message.starts_with("Client error: `GET "), "{message}");
    assert!(message.contains("/servers/99` resulted in a `404 Not Found` response"));
    assert!(message.contains("not_found"));
    assert!(!message.contains(TOKEN));
    assert!(!format!("{err:?}").contains(TOKEN));

    let request = err.request().expect("request is attached");
    assert_eq!(request.authorization(), Some(REDACTED_BEARER));

    let api_error = err.http_failure().and_then(|f| f.api_error()).unwrap();
    assert_eq!(api_error.code, "not_found");
}

#[tokio::test]
async fn test_500_is_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri())
        .ssh_keys()
        .list(1, 25)
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    let message = err.to_string();
    assert!(message.starts_with("Server error: `GET "));
    assert!(message.ends_with("resulted in a `500 Internal Server Error` response"));
    assert!(!format!("{err:?}").contains(TOKEN));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri())
        .ssh_keys()
        .get(1)
        .await
        .unwrap_err();

    assert!(err.is_decode_error());
    assert!(matches!(err, HcloudError::ResponseDecode { .. }), "{err:?}");
    assert_eq!(err.status(), Some(reqwest::StatusCode::OK));

    let request = err.request().expect("request is attached");
    assert_eq!(request.url().path(), "/ssh_keys/1");
    assert_eq!(request.authorization(), Some(REDACTED_BEARER));

    let message = err.to_string();
    assert!(message.contains("`GET "), "{message}");
    assert!(message.contains("/ssh_keys/1`"), "{message}");
    assert!(!message.contains(TOKEN));
}

// =============================================================================
// Transport Failures
// =============================================================================

/// An address nothing listens on: bind a port, then release it.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1/")
}

#[tokio::test]
async fn test_connect_failure_is_redacted() {
    let url = closed_port_url().await;

    let err = client(&url).servers().get(1).await.unwrap_err();

    assert!(matches!(err, HcloudError::Connect { .. }), "{err:?}");
    assert!(!err.to_string().contains(TOKEN));
    assert!(!format!("{err:?}").contains(TOKEN));
    assert_eq!(
        err.request().and_then(|r| r.authorization()),
        Some(REDACTED_BEARER)
    );
}

#[tokio::test]
async fn test_connect_failure_retried_with_backoff() {
    let url = closed_port_url().await;
    let client = HetznerClient::builder(TOKEN)
        .base_url(url)
        .connect_retries(2)
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client.servers().get(1).await.unwrap_err();

    assert!(matches!(err, HcloudError::Connect { .. }));
    // 100ms + 200ms of backoff between the three attempts.
    assert!(started.elapsed() >= Duration::from_millis(300));
}

// =============================================================================
// Retry-After
// =============================================================================

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ssh_key": ssh_key_json(1)})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(InMemoryRetryAfterCache::new());
    let client = HetznerClient::builder(TOKEN)
        .base_url(mock_server.uri())
        .retry_after_cache(cache.clone())
        .build()
        .unwrap();

    let started = Instant::now();
    let response = client.ssh_keys().get(1).await.expect("retry should succeed");

    assert_eq!(response.result.id, 1);
    assert!(started.elapsed() >= Duration::from_millis(900));
    assert!(cache.get(&cache_key(TOKEN)).is_some());
}

#[tokio::test]
async fn test_rate_limit_gives_up_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = HetznerClient::builder(TOKEN)
        .base_url(mock_server.uri())
        .retry_after_retries(1)
        .build()
        .unwrap();

    let err = client.ssh_keys().get(1).await.unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));
}

#[tokio::test]
async fn test_429_without_retry_after_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri())
        .ssh_keys()
        .get(1)
        .await
        .unwrap_err();

    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_huge_retry_after_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "18446744073709551615"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(InMemoryRetryAfterCache::new());
    let client = HetznerClient::builder(TOKEN)
        .base_url(mock_server.uri())
        .retry_after_cache(cache.clone())
        .build()
        .unwrap();

    let err = client.ssh_keys().get(1).await.unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));

    // The hint is kept, clamped to the ceiling.
    let until = cache.get(&cache_key(TOKEN)).expect("hint stored");
    let left = until.duration_since(SystemTime::now()).unwrap();
    assert!(left <= MAX_RETRY_AFTER);
}

#[tokio::test]
async fn test_retry_after_stored_when_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssh_keys/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(InMemoryRetryAfterCache::new());
    let client = HetznerClient::builder(TOKEN)
        .base_url(mock_server.uri())
        .retry_after_retries(0)
        .retry_after_cache(cache.clone())
        .build()
        .unwrap();

    let err = client.ssh_keys().get(1).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));

    let until = cache.get(&cache_key(TOKEN)).expect("hint stored");
    let left = until.duration_since(SystemTime::now()).unwrap();
    assert!(left > Duration::from_secs(25));
}
