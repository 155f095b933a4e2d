//! Credential obfuscation.
//!
//! Anything that may end up in a log line or an error message passes
//! through [`obfuscate`] first. The outgoing request itself keeps the real
//! credential; only copies made for reporting are redacted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use url::Url;

/// Replacement written in place of a bearer token.
pub const REDACTED_BEARER: &str = "Bearer **********";

static BEARER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Bearer\s+\S+").expect("Invalid bearer token regex"));

/// Replace every `Bearer <token>` occurrence with [`REDACTED_BEARER`].
///
/// Idempotent: already obfuscated text is returned unchanged.
///
/// ```
/// use hcloud_sdk::obfuscate;
///
/// let line = obfuscate("Authorization: Bearer s3cr3t");
/// assert_eq!(line, "Authorization: Bearer **********");
/// assert_eq!(obfuscate(&line), line);
/// ```
pub fn obfuscate(text: &str) -> String {
    BEARER_TOKEN.replace_all(text, REDACTED_BEARER).into_owned()
}

/// A copy of an outgoing request that is safe to log or embed in errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedRequest {
    method: Method,
    url: Url,
    authorization: Option<String>,
}

impl RedactedRequest {
    /// Build a redacted request; the authorization value is obfuscated here.
    pub fn new(method: Method, url: Url, authorization: Option<String>) -> Self {
        Self {
            method,
            url,
            authorization: authorization.map(|value| obfuscate(&value)),
        }
    }

    /// Snapshot a request that is about to be sent.
    pub fn from_request(request: &reqwest::Request) -> Self {
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        Self::new(request.method().clone(), request.url().clone(), authorization)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The obfuscated Authorization header, if one was set.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }
}

impl fmt::Display for RedactedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
