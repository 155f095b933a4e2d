//! Shared store for rate-limit `Retry-After` hints.
//!
//! When the API answers `429 Too Many Requests` with a `Retry-After`
//! header, the client records the instant before which no further request
//! should be sent. The store is keyed by a hash of the credential so
//! several clients sharing a token also share the hint.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use sha2::{Digest, Sha256};

/// Prefix of every cache key.
pub const CACHE_KEY_PREFIX: &str = "hetzner:retry-after:";

/// Longest `Retry-After` hint the client honours. Longer hints are stored
/// clamped to this value and the request is not retried.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

/// Storage for "retry not before" instants.
///
/// Implement this to share hints across processes (e.g. backed by Redis).
pub trait RetryAfterCache: Send + Sync {
    /// The stored instant for `key`, if any.
    fn get(&self, key: &str) -> Option<SystemTime>;

    /// Store `until` for `key`, replacing any previous value.
    fn set(&self, key: &str, until: SystemTime);
}

/// Process-local [`RetryAfterCache`].
#[derive(Debug, Default)]
pub struct InMemoryRetryAfterCache {
    entries: Mutex<HashMap<String, SystemTime>>,
}

impl InMemoryRetryAfterCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RetryAfterCache for InMemoryRetryAfterCache {
    fn get(&self, key: &str) -> Option<SystemTime> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).copied()
    }

    fn set(&self, key: &str, until: SystemTime) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), until);
    }
}

/// Cache key for a credential. The token itself never appears in the key.
pub fn cache_key(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{CACHE_KEY_PREFIX}{}", &hex::encode(digest)[..16])
}

/// Parse a `Retry-After` header given in delta-seconds.
pub(crate) fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// The instant before which no request should be sent, for a hint of
/// `delay` received now. The hint is clamped to [`MAX_RETRY_AFTER`].
pub(crate) fn not_before(delay: Duration) -> Option<SystemTime> {
    SystemTime::now().checked_add(delay.min(MAX_RETRY_AFTER))
}

/// Time left until `until`, or `None` if it has passed.
pub(crate) fn remaining(until: SystemTime) -> Option<Duration> {
    until
        .duration_since(SystemTime::now())
        .ok()
        .filter(|d| !d.is_zero())
}
