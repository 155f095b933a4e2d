//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Hetzner Cloud API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Action, ActionResource, ActionStatus, Firewall, Network, Server, SshKey};

/// An action together with how many more fetches report it as running.
#[derive(Debug, Clone)]
pub struct MockAction {
    pub action: Action,
    pub remaining_polls: u32,
}

/// Shared state for the mock server.
///
/// Resources are kept in ordered maps so listings are stable across pages.
#[derive(Debug, Default)]
pub struct MockState {
    pub servers: BTreeMap<u64, Server>,

    pub firewalls: BTreeMap<u64, Firewall>,

    pub networks: BTreeMap<u64, Network>,

    pub ssh_keys: BTreeMap<u64, SshKey>,

    pub actions: BTreeMap<u64, MockAction>,

    /// Number of fetches a newly started action stays `running` for.
    pub action_polls: u32,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    last_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.bump_id(server.id);
        self.servers.insert(server.id, server);
        self
    }

    pub fn with_firewall(mut self, firewall: Firewall) -> Self {
        self.bump_id(firewall.id);
        self.firewalls.insert(firewall.id, firewall);
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.bump_id(network.id);
        self.networks.insert(network.id, network);
        self
    }

    pub fn with_ssh_key(mut self, key: SshKey) -> Self {
        self.bump_id(key.id);
        self.ssh_keys.insert(key.id, key);
        self
    }

    /// Add an action that reports `running` for `remaining_polls` fetches.
    pub fn with_action(mut self, action: Action, remaining_polls: u32) -> Self {
        self.bump_id(action.id);
        self.actions.insert(
            action.id,
            MockAction {
                action,
                remaining_polls,
            },
        );
        self
    }

    /// Let newly started actions run for `polls` fetches before succeeding.
    pub fn with_action_polls(mut self, polls: u32) -> Self {
        self.action_polls = polls;
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Allocate a fresh ID.
    pub fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Record a new running action on a resource.
    pub fn start_action(&mut self, command: &str, resource_id: u64, resource_type: &str) -> Action {
        let action = Action {
            id: self.next_id(),
            command: command.to_string(),
            status: ActionStatus::Running,
            progress: 0,
            started: Utc::now(),
            finished: None,
            error: None,
            resources: vec![ActionResource {
                id: resource_id,
                resource_type: resource_type.to_string(),
            }],
        };

        self.actions.insert(
            action.id,
            MockAction {
                action: action.clone(),
                remaining_polls: self.action_polls,
            },
        );
        action
    }

    /// Fetch an action, advancing it one step towards completion.
    pub fn poll_action(&mut self, id: u64) -> Option<Action> {
        let entry = self.actions.get_mut(&id)?;

        if entry.action.status == ActionStatus::Running {
            if entry.remaining_polls == 0 {
                entry.action.status = ActionStatus::Success;
                entry.action.progress = 100;
                entry.action.finished = Some(Utc::now());
            } else {
                entry.remaining_polls -= 1;
                entry.action.progress = entry.action.progress.saturating_add(10).min(90);
            }
        }

        Some(entry.action.clone())
    }

    fn bump_id(&mut self, id: u64) {
        self.last_id = self.last_id.max(id);
    }
}
