//! Private network model and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Labels, Protection};

/// A private network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,

    pub name: String,

    /// IPv4 prefix of the whole network, e.g. `10.0.0.0/16`.
    pub ip_range: String,

    #[serde(default)]
    pub subnets: Vec<Subnet>,

    #[serde(default)]
    pub routes: Vec<Route>,

    /// IDs of attached servers.
    #[serde(default)]
    pub servers: Vec<u64>,

    /// IDs of attached load balancers.
    #[serde(default)]
    pub load_balancers: Vec<u64>,

    #[serde(default)]
    pub protection: Protection,

    #[serde(default)]
    pub labels: Labels,

    pub created: DateTime<Utc>,

    #[serde(default)]
    pub expose_routes_to_vswitch: bool,
}

/// A subnet of a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    /// `cloud`, `server` or `vswitch`.
    #[serde(rename = "type")]
    pub subnet_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_range: Option<String>,

    pub network_zone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vswitch_id: Option<u64>,
}

impl Subnet {
    /// A `cloud` subnet in `network_zone`.
    pub fn cloud(network_zone: impl Into<String>, ip_range: impl Into<String>) -> Self {
        Self {
            subnet_type: "cloud".to_string(),
            ip_range: Some(ip_range.into()),
            network_zone: network_zone.into(),
            gateway: None,
            vswitch_id: None,
        }
    }
}

/// A static route of a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub destination: String,
    pub gateway: String,
}

/// Parameters for creating a network.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateNetworkParams {
    pub name: String,

    pub ip_range: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<Subnet>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_routes_to_vswitch: Option<bool>,
}

/// Parameters for updating a network.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNetworkParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_routes_to_vswitch: Option<bool>,
}
