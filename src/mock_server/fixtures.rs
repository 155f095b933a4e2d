//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{
    Action, ActionStatus, Firewall, FirewallResource, FirewallResourceServer, FirewallRule, Ipv4,
    Labels, Network, Protection, PublicNet, RuleProtocol, Server, ServerType, SshKey, Subnet,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data a default mock server starts with.
pub struct DefaultScenario {
    pub servers: Vec<Server>,
    pub firewalls: Vec<Firewall>,
    pub networks: Vec<Network>,
    pub ssh_keys: Vec<SshKey>,
}

fn created() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

impl Fixtures {
    // =========================================================================
    // Server Fixtures
    // =========================================================================

    /// A running `cx22` server with a public IPv4 address.
    pub fn server(id: u64, name: &str) -> Server {
        Server {
            id,
            name: name.to_string(),
            status: "running".to_string(),
            public_net: PublicNet {
                ipv4: Some(Ipv4 {
                    ip: format!("192.0.2.{}", id % 255),
                    blocked: false,
                    dns_ptr: None,
                    id: None,
                }),
                ipv6: None,
                floating_ips: vec![],
            },
            server_type: Self::server_type(),
            datacenter: None,
            image: None,
            labels: Labels::new(),
            created: created(),
            location: None,
            locked: false,
            rescue_enabled: false,
            protection: Some(Protection::default()),
            private_net: vec![],
            volumes: vec![],
            load_balancers: vec![],
            primary_disk_size: Some(40),
            included_traffic: None,
            ingoing_traffic: None,
            outgoing_traffic: None,
            iso: None,
            backup_window: None,
            placement_group: None,
        }
    }

    pub fn server_type() -> ServerType {
        ServerType {
            id: 1,
            name: "cx22".to_string(),
            description: "CX22".to_string(),
            cores: Some(2),
            memory: Some(4.0),
            disk: Some(40.0),
            cpu_type: Some("shared".to_string()),
            storage_type: Some("local".to_string()),
            architecture: Some("x86".to_string()),
            deprecated: Some(false),
            prices: vec![],
        }
    }

    // =========================================================================
    // Firewall Fixtures
    // =========================================================================

    /// A firewall allowing SSH and HTTP, applied to `server_ids`.
    pub fn firewall(id: u64, name: &str, server_ids: &[u64]) -> Firewall {
        Firewall {
            id,
            name: name.to_string(),
            labels: Labels::new(),
            rules: vec![
                FirewallRule::inbound(RuleProtocol::Tcp, Some("22"), ["0.0.0.0/0", "::/0"]),
                FirewallRule::inbound(RuleProtocol::Tcp, Some("80"), ["0.0.0.0/0", "::/0"]),
            ],
            applied_to: server_ids
                .iter()
                .map(|&id| FirewallResource {
                    resource_type: "server".to_string(),
                    server: Some(FirewallResourceServer { id }),
                    label_selector: None,
                })
                .collect(),
            created: created(),
        }
    }

    // =========================================================================
    // Network Fixtures
    // =========================================================================

    /// A `10.0.0.0/16` network with one cloud subnet.
    pub fn network(id: u64, name: &str) -> Network {
        Network {
            id,
            name: name.to_string(),
            ip_range: "10.0.0.0/16".to_string(),
            subnets: vec![Subnet::cloud("eu-central", "10.0.1.0/24")],
            routes: vec![],
            servers: vec![],
            load_balancers: vec![],
            protection: Protection::default(),
            labels: Labels::new(),
            created: created(),
            expose_routes_to_vswitch: false,
        }
    }

    // =========================================================================
    // SSH Key Fixtures
    // =========================================================================

    pub fn ssh_key(id: u64, name: &str) -> SshKey {
        SshKey {
            id,
            name: name.to_string(),
            fingerprint: format!("b7:2f:30:a0:2f:6c:58:6c:21:04:58:61:ba:06:3b:{:02x}", id % 256),
            public_key: format!("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAA{id} {name}"),
            labels: Labels::new(),
            created: created(),
        }
    }

    // =========================================================================
    // Action Fixtures
    // =========================================================================

    pub fn action(id: u64, command: &str, status: ActionStatus) -> Action {
        let finished = matches!(status, ActionStatus::Success | ActionStatus::Error);
        Action {
            id,
            command: command.to_string(),
            status,
            progress: if finished { 100 } else { 0 },
            started: created(),
            finished: finished.then(created),
            error: None,
            resources: vec![],
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Three servers, one firewall applied to the first two, one network and
    /// two SSH keys.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            servers: vec![
                Self::server(1, "web-1"),
                Self::server(2, "web-2"),
                Self::server(3, "db-1"),
            ],
            firewalls: vec![Self::firewall(10, "web", &[1, 2])],
            networks: vec![Self::network(20, "backend")],
            ssh_keys: vec![Self::ssh_key(30, "laptop"), Self::ssh_key(31, "ci")],
        }
    }
}
