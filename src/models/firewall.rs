//! Firewall model and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::common::Labels;

/// A firewall with its rules and the resources it is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub rules: Vec<FirewallRule>,
    #[serde(default)]
    pub applied_to: Vec<FirewallResource>,
    pub created: DateTime<Utc>,
}

impl Firewall {
    /// IDs of servers the firewall is directly applied to.
    pub fn server_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.applied_to
            .iter()
            .filter_map(|resource| resource.server.map(|server| server.id))
    }
}

/// Result of creating a firewall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedFirewall {
    pub firewall: Firewall,

    /// Actions applying the initial rules and resources.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A single firewall rule.
///
/// Also used as the request shape for creating firewalls and setting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub direction: RuleDirection,

    pub protocol: RuleProtocol,

    /// Port or port range (`"80"`, `"1024-5000"`); only for TCP and UDP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// CIDRs allowed for incoming rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_ips: Vec<String>,

    /// CIDRs allowed for outgoing rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination_ips: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FirewallRule {
    /// Incoming rule for `protocol` from `source_ips`.
    pub fn inbound(
        protocol: RuleProtocol,
        port: Option<&str>,
        source_ips: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            direction: RuleDirection::In,
            protocol,
            port: port.map(str::to_string),
            source_ips: source_ips.into_iter().map(Into::into).collect(),
            destination_ips: Vec::new(),
            description: None,
        }
    }

    /// Outgoing rule for `protocol` to `destination_ips`.
    pub fn outbound(
        protocol: RuleProtocol,
        port: Option<&str>,
        destination_ips: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            direction: RuleDirection::Out,
            protocol,
            port: port.map(str::to_string),
            source_ips: Vec::new(),
            destination_ips: destination_ips.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Traffic direction of a [`FirewallRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDirection {
    In,
    Out,
}

/// Protocol matched by a [`FirewallRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleProtocol {
    Tcp,
    Udp,
    Icmp,
    Esp,
    Gre,
}

/// A resource a firewall is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResource {
    /// `server` or `label_selector`.
    #[serde(rename = "type")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<FirewallResourceServer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<FirewallResourceLabelSelector>,
}

/// Server reference inside a [`FirewallResource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResourceServer {
    pub id: u64,
}

/// Label selector inside a [`FirewallResource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResourceLabelSelector {
    pub selector: String,
}

/// Target for applying or removing a firewall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FirewallTarget {
    Server { server: FirewallResourceServer },
    LabelSelector { label_selector: FirewallResourceLabelSelector },
}

impl FirewallTarget {
    /// Target a single server.
    pub fn server(id: u64) -> Self {
        Self::Server {
            server: FirewallResourceServer { id },
        }
    }

    /// Target every server matching a label selector.
    pub fn label_selector(selector: impl Into<String>) -> Self {
        Self::LabelSelector {
            label_selector: FirewallResourceLabelSelector {
                selector: selector.into(),
            },
        }
    }
}

/// Parameters for creating a firewall.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateFirewallParams {
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FirewallRule>,

    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
}

/// Parameters for updating a firewall.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateFirewallParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Replaces all existing labels when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}
