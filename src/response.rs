//! Decoding of API response envelopes.
//!
//! Every endpoint answers with a JSON object whose payload sits under a
//! resource-specific key (`server`, `servers`, `action`, ...), optionally
//! accompanied by `meta.pagination`. An [`Envelope`] describes one such
//! shape; [`decode`] turns a raw body into an [`HcloudResponse`].

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::{Action, CreatedFirewall, CreatedServer, Firewall, Network, Server, SshKey};
use crate::pagination::Pagination;

/// A decoded API response.
#[derive(Debug, Clone)]
pub struct HcloudResponse<T> {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded payload.
    pub result: T,
    /// Pagination metadata, present on list endpoints.
    pub pagination: Option<Pagination>,
}

impl<T> HcloudResponse<T> {
    /// Map the payload, keeping status, headers and pagination.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> HcloudResponse<U> {
        HcloudResponse {
            status: self.status,
            headers: self.headers,
            result: f(self.result),
            pagination: self.pagination,
        }
    }

    /// Consume the response and return only the payload.
    pub fn into_result(self) -> T {
        self.result
    }

    /// The last page number, treating absent metadata as a single page.
    pub fn last_page(&self) -> u32 {
        self.pagination
            .as_ref()
            .and_then(|pagination| pagination.last_page)
            .unwrap_or(1)
    }
}

impl HcloudResponse<()> {
    /// Response for endpoints that answer without a body (e.g. `204 No Content`).
    pub fn empty(status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            status,
            headers,
            result: (),
            pagination: None,
        }
    }
}

/// A response body shape.
pub trait Envelope: DeserializeOwned {
    /// The typed payload extracted from the envelope.
    type Output;

    fn into_output(self) -> Self::Output;
}

/// Decode `body` as envelope `E`.
///
/// Fails atomically on invalid JSON or a missing required field.
pub fn decode<E: Envelope>(
    status: StatusCode,
    headers: HeaderMap,
    body: &[u8],
) -> Result<HcloudResponse<E::Output>> {
    let value: Value = serde_json::from_slice(body)?;

    let pagination = value
        .get("meta")
        .and_then(|meta| meta.get("pagination"))
        .filter(|pagination| pagination.is_object())
        .map(Pagination::deserialize)
        .transpose()?;

    let envelope: E = serde_json::from_value(value)?;

    Ok(HcloudResponse {
        status,
        headers,
        result: envelope.into_output(),
        pagination,
    })
}

impl Envelope for Map<String, Value> {
    type Output = Map<String, Value>;

    fn into_output(self) -> Self::Output {
        self
    }
}

macro_rules! single_envelope {
    ($name:ident, $key:ident, $ty:ty) => {
        #[doc = concat!("`{\"", stringify!($key), "\": {...}}`")]
        #[derive(Debug, Deserialize)]
        pub struct $name {
            $key: $ty,
        }

        impl Envelope for $name {
            type Output = $ty;

            fn into_output(self) -> Self::Output {
                self.$key
            }
        }
    };
}

macro_rules! list_envelope {
    ($name:ident, $key:ident, $ty:ty) => {
        #[doc = concat!("`{\"", stringify!($key), "\": [...]}`")]
        #[derive(Debug, Deserialize)]
        pub struct $name {
            #[serde(default)]
            $key: Vec<$ty>,
        }

        impl Envelope for $name {
            type Output = Vec<$ty>;

            fn into_output(self) -> Self::Output {
                self.$key
            }
        }
    };
}

single_envelope!(ActionEnvelope, action, Action);
list_envelope!(ActionListEnvelope, actions, Action);
single_envelope!(ServerEnvelope, server, Server);
list_envelope!(ServerListEnvelope, servers, Server);
single_envelope!(FirewallEnvelope, firewall, Firewall);
list_envelope!(FirewallListEnvelope, firewalls, Firewall);
single_envelope!(NetworkEnvelope, network, Network);
list_envelope!(NetworkListEnvelope, networks, Network);
single_envelope!(SshKeyEnvelope, ssh_key, SshKey);
list_envelope!(SshKeyListEnvelope, ssh_keys, SshKey);

/// Envelope of `POST /servers`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CreatedServerEnvelope(CreatedServer);

impl Envelope for CreatedServerEnvelope {
    type Output = CreatedServer;

    fn into_output(self) -> Self::Output {
        self.0
    }
}

/// Envelope of `POST /firewalls`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CreatedFirewallEnvelope(CreatedFirewall);

impl Envelope for CreatedFirewallEnvelope {
    type Output = CreatedFirewall;

    fn into_output(self) -> Self::Output {
        self.0
    }
}
