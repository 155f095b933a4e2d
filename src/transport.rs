//! Authenticated HTTP plumbing shared by all resource façades.
//!
//! Every request runs through the same pipeline: wait out any stored
//! `Retry-After` hint, send, log the exchange with the credential
//! obfuscated, retry connect failures and rate-limited responses, and
//! classify whatever is still unsuccessful.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::classify::{classify_response, classify_transport};
use crate::error::{HcloudError, Result};
use crate::obfuscate::RedactedRequest;
use crate::response::{decode, Envelope, HcloudResponse};
use crate::retry_after::{
    cache_key, not_before, parse_retry_after, remaining, RetryAfterCache, MAX_RETRY_AFTER,
};

const USER_AGENT: &str = concat!("hcloud-sdk/", env!("CARGO_PKG_VERSION"));

/// First delay of the connect-retry backoff; doubled on every retry.
const CONNECT_BACKOFF_BASE: Duration = Duration::from_millis(100);

/// Upper bound of a single connect-retry delay.
const CONNECT_BACKOFF_MAX: Duration = Duration::from_secs(10);

/// Settings the transport is built from.
pub(crate) struct TransportSettings {
    pub base_url: Url,
    pub token: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub connect_retries: u32,
    pub retry_after_retries: u32,
    pub retry_after_cache: Arc<dyn RetryAfterCache>,
}

pub(crate) struct Transport {
    http: Client,
    base_url: Url,
    token: String,
    connect_retries: u32,
    retry_after_retries: u32,
    retry_after_cache: Arc<dyn RetryAfterCache>,
    cache_key: String,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("connect_retries", &self.connect_retries)
            .field("retry_after_retries", &self.retry_after_retries)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(settings: TransportSettings) -> Result<Self> {
        if HeaderValue::from_str(&format!("Bearer {}", settings.token)).is_err() {
            return Err(HcloudError::InvalidConfig(
                "API token contains characters that are not allowed in a header".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .build()
            .map_err(HcloudError::Http)?;

        Ok(Self {
            http,
            cache_key: cache_key(&settings.token),
            base_url: settings.base_url,
            token: settings.token,
            connect_retries: settings.connect_retries,
            retry_after_retries: settings.retry_after_retries,
            retry_after_cache: settings.retry_after_cache,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET path` decoded as `E`.
    pub(crate) async fn get<E: Envelope>(&self, path: &str) -> Result<HcloudResponse<E::Output>> {
        self.fetch::<E>(Method::GET, path, |request| request).await
    }

    /// `GET path?query` decoded as `E`.
    pub(crate) async fn get_with_query<E, Q>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<HcloudResponse<E::Output>>
    where
        E: Envelope,
        Q: Serialize + ?Sized,
    {
        self.fetch::<E>(Method::GET, path, |request| request.query(query))
            .await
    }

    /// `POST path` with a JSON body, decoded as `E`.
    pub(crate) async fn post<E, B>(&self, path: &str, body: &B) -> Result<HcloudResponse<E::Output>>
    where
        E: Envelope,
        B: Serialize + ?Sized,
    {
        self.fetch::<E>(Method::POST, path, |request| request.json(body))
            .await
    }

    /// `POST path` without a body, decoded as `E`.
    pub(crate) async fn post_empty<E: Envelope>(
        &self,
        path: &str,
    ) -> Result<HcloudResponse<E::Output>> {
        self.fetch::<E>(Method::POST, path, |request| request).await
    }

    /// `PUT path` with a JSON body, decoded as `E`.
    pub(crate) async fn put<E, B>(&self, path: &str, body: &B) -> Result<HcloudResponse<E::Output>>
    where
        E: Envelope,
        B: Serialize + ?Sized,
    {
        self.fetch::<E>(Method::PUT, path, |request| request.json(body))
            .await
    }

    /// `DELETE path` decoded as `E`.
    pub(crate) async fn delete<E: Envelope>(
        &self,
        path: &str,
    ) -> Result<HcloudResponse<E::Output>> {
        self.fetch::<E>(Method::DELETE, path, |request| request)
            .await
    }

    /// `DELETE path` for endpoints answering without a body.
    pub(crate) async fn delete_empty(&self, path: &str) -> Result<HcloudResponse<()>> {
        let (response, _) = self.send(Method::DELETE, path, |request| request).await?;
        Ok(HcloudResponse::empty(
            response.status(),
            response.headers().clone(),
        ))
    }

    async fn fetch<E: Envelope>(
        &self,
        method: Method,
        path: &str,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<HcloudResponse<E::Output>> {
        let (response, request) = self.send(method, path, configure).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(HcloudError::Http)?;

        decode::<E>(status, headers, &body).map_err(|err| match err {
            HcloudError::Decode(source) => HcloudError::ResponseDecode {
                request,
                status,
                source,
            },
            other => other,
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<(Response, RedactedRequest)> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let request = configure(self.http.request(method, url).bearer_auth(&self.token))
            .build()
            .map_err(HcloudError::Http)?;
        let redacted = RedactedRequest::from_request(&request);

        let mut connect_retries = 0;
        let mut rate_limit_retries = 0;

        loop {
            self.wait_for_retry_after().await;

            let attempt = request.try_clone().ok_or_else(|| {
                HcloudError::InvalidConfig("streaming request bodies cannot be retried".to_string())
            })?;

            match self.http.execute(attempt).await {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!(
                        method = %redacted.method(),
                        url = %redacted.url(),
                        authorization = redacted.authorization().unwrap_or_default(),
                        status = status.as_u16(),
                        "Hetzner Cloud API exchange"
                    );

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        if let Some(delay) = retry_after(&response) {
                            // Shared with other clients using the token, even
                            // when this request gives up.
                            if let Some(until) = not_before(delay) {
                                self.retry_after_cache.set(&self.cache_key, until);
                            }

                            if rate_limit_retries < self.retry_after_retries
                                && delay <= MAX_RETRY_AFTER
                            {
                                rate_limit_retries += 1;
                                tracing::warn!(
                                    request = %redacted,
                                    delay_secs = delay.as_secs(),
                                    attempt = rate_limit_retries,
                                    "Rate limited, retrying after delay"
                                );
                                continue;
                            }
                        }
                    }

                    if status.as_u16() < 400 {
                        return Ok((response, redacted));
                    }

                    let body = response.text().await.ok();
                    return Err(classify_response(redacted, status, body));
                }
                Err(err) if err.is_connect() && connect_retries < self.connect_retries => {
                    connect_retries += 1;
                    let delay = connect_backoff(connect_retries);
                    tracing::warn!(
                        request = %redacted,
                        attempt = connect_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(classify_transport(redacted, err)),
            }
        }
    }

    async fn wait_for_retry_after(&self) {
        let Some(delay) = self
            .retry_after_cache
            .get(&self.cache_key)
            .and_then(remaining)
        else {
            return;
        };

        tracing::debug!(delay_ms = delay.as_millis() as u64, "Waiting for Retry-After window");
        tokio::time::sleep(delay).await;
    }
}

/// Delay before connect retry number `retry` (1-based): 100 ms doubled per
/// retry, capped at [`CONNECT_BACKOFF_MAX`].
fn connect_backoff(retry: u32) -> Duration {
    let factor = 2u32.saturating_pow(retry.saturating_sub(1));
    CONNECT_BACKOFF_BASE
        .saturating_mul(factor)
        .min(CONNECT_BACKOFF_MAX)
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_retry_after)
}
