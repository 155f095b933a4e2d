//! Server model and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::common::{Labels, Protection};
use super::image::Image;
use super::location::{Datacenter, Location};

/// A Hetzner Cloud server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: u64,

    pub name: String,

    /// `running`, `initializing`, `starting`, `stopping`, `off`, ...
    pub status: String,

    pub public_net: PublicNet,

    pub server_type: ServerType,

    #[serde(default)]
    pub datacenter: Option<Datacenter>,

    #[serde(default)]
    pub image: Option<Image>,

    #[serde(default)]
    pub labels: Labels,

    pub created: DateTime<Utc>,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub rescue_enabled: bool,

    #[serde(default)]
    pub protection: Option<Protection>,

    /// Private networks the server is attached to.
    #[serde(default)]
    pub private_net: Vec<ServerPrivateNet>,

    /// IDs of attached volumes.
    #[serde(default)]
    pub volumes: Vec<u64>,

    /// IDs of load balancers targeting this server.
    #[serde(default)]
    pub load_balancers: Vec<u64>,

    /// Size of the primary disk in GB.
    #[serde(default)]
    pub primary_disk_size: Option<u64>,

    /// Free traffic in bytes.
    #[serde(default)]
    pub included_traffic: Option<u64>,

    #[serde(default)]
    pub ingoing_traffic: Option<u64>,

    #[serde(default)]
    pub outgoing_traffic: Option<u64>,

    /// Attached ISO, if any.
    #[serde(default)]
    pub iso: Option<serde_json::Value>,

    #[serde(default)]
    pub backup_window: Option<String>,

    #[serde(default)]
    pub placement_group: Option<serde_json::Value>,
}

impl Server {
    /// Primary public IPv4 address, if one is assigned.
    pub fn public_ipv4(&self) -> Option<&str> {
        self.public_net.ipv4.as_ref().map(|ipv4| ipv4.ip.as_str())
    }

    /// IP of the server in the given private network.
    pub fn private_ip(&self, network_id: u64) -> Option<&str> {
        self.private_net
            .iter()
            .find(|net| net.network == network_id)
            .map(|net| net.ip.as_str())
    }
}

/// Public network configuration of a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicNet {
    #[serde(default)]
    pub ipv4: Option<Ipv4>,

    #[serde(default)]
    pub ipv6: Option<Ipv6>,

    #[serde(default)]
    pub floating_ips: Vec<u64>,
}

/// Public IPv4 address of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4 {
    pub ip: String,
    pub blocked: bool,
    #[serde(default)]
    pub dns_ptr: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
}

/// Public IPv6 network of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv6 {
    pub ip: String,
    pub blocked: bool,
    #[serde(default)]
    pub dns_ptr: Option<Vec<DnsPtr>>,
    #[serde(default)]
    pub id: Option<u64>,
}

/// Reverse DNS entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPtr {
    pub ip: String,
    pub dns_ptr: String,
}

/// Attachment of a server to a private network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPrivateNet {
    /// Network ID.
    pub network: u64,
    pub ip: String,
    #[serde(default)]
    pub alias_ips: Vec<String>,
    pub mac_address: String,
}

/// Hardware profile of a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerType {
    pub id: u64,
    /// Unique identifier such as `cx22`.
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub cores: Option<u32>,
    /// Memory in GB.
    #[serde(default)]
    pub memory: Option<f64>,
    /// Disk size in GB.
    #[serde(default)]
    pub disk: Option<f64>,
    #[serde(default)]
    pub cpu_type: Option<String>,
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub deprecated: Option<bool>,
    #[serde(default)]
    pub prices: Vec<serde_json::Value>,
}

/// Result of creating a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedServer {
    pub server: Server,

    /// The `create_server` action.
    #[serde(default)]
    pub action: Option<Action>,

    /// Follow-up actions such as `start_server`.
    #[serde(default)]
    pub next_actions: Vec<Action>,

    /// Root password, only set when no SSH key was given.
    #[serde(default)]
    pub root_password: Option<String>,
}

/// Parameters for creating a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServerParams {
    pub name: String,

    /// Server type ID or name.
    pub server_type: String,

    /// Image ID or name.
    pub image: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<u64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<u64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub firewalls: Vec<ServerFirewall>,

    /// Cloud-init user data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,

    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_after_create: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_group: Option<u64>,
}

/// Firewall to apply on server creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerFirewall {
    pub firewall: u64,
}

/// Parameters for attaching a server to a network.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttachToNetworkParams {
    /// Network ID.
    pub network: u64,

    /// IP to request; assigned automatically when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias_ips: Vec<String>,
}
