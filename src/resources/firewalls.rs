//! `/firewalls` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::models::{
    Action, CreateFirewallParams, CreatedFirewall, Firewall, FirewallRule, FirewallTarget,
    UpdateFirewallParams,
};
use crate::pagination::ListParams;
use crate::response::{
    ActionListEnvelope, CreatedFirewallEnvelope, FirewallEnvelope, FirewallListEnvelope,
    HcloudResponse,
};
use crate::traits::{Get, List, Update};
use crate::transport::Transport;

#[derive(Serialize)]
struct SetRulesBody<'a> {
    rules: &'a [FirewallRule],
}

#[derive(Serialize)]
struct ApplyToBody<'a> {
    apply_to: &'a [FirewallTarget],
}

#[derive(Serialize)]
struct RemoveFromBody<'a> {
    remove_from: &'a [FirewallTarget],
}

/// Access to firewalls.
#[derive(Debug, Clone)]
pub struct FirewallsResource {
    transport: Arc<Transport>,
}

impl FirewallsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Create a firewall. Empty rule and label collections are not sent.
    #[tracing::instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create(
        &self,
        params: &CreateFirewallParams,
    ) -> Result<HcloudResponse<CreatedFirewall>> {
        self.transport
            .post::<CreatedFirewallEnvelope, _>("firewalls", params)
            .await
    }

    /// Delete a firewall. The API answers without a body.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<HcloudResponse<()>> {
        self.transport.delete_empty(&format!("firewalls/{id}")).await
    }

    /// Replace all rules of a firewall. An empty slice removes every rule.
    #[tracing::instrument(skip(self, rules), fields(rules = rules.len()))]
    pub async fn set_rules(
        &self,
        id: u64,
        rules: &[FirewallRule],
    ) -> Result<HcloudResponse<Vec<Action>>> {
        self.action(id, "set_rules", &SetRulesBody { rules }).await
    }

    /// Apply a firewall to servers or label selectors.
    #[tracing::instrument(skip(self, targets), fields(targets = targets.len()))]
    pub async fn apply_to_resources(
        &self,
        id: u64,
        targets: &[FirewallTarget],
    ) -> Result<HcloudResponse<Vec<Action>>> {
        self.action(id, "apply_to_resources", &ApplyToBody { apply_to: targets })
            .await
    }

    /// Remove a firewall from servers or label selectors.
    #[tracing::instrument(skip(self, targets), fields(targets = targets.len()))]
    pub async fn remove_from_resources(
        &self,
        id: u64,
        targets: &[FirewallTarget],
    ) -> Result<HcloudResponse<Vec<Action>>> {
        self.action(
            id,
            "remove_from_resources",
            &RemoveFromBody {
                remove_from: targets,
            },
        )
        .await
    }

    async fn action<B: Serialize + ?Sized>(
        &self,
        id: u64,
        verb: &str,
        body: &B,
    ) -> Result<HcloudResponse<Vec<Action>>> {
        self.transport
            .post::<ActionListEnvelope, _>(&format!("firewalls/{id}/actions/{verb}"), body)
            .await
    }
}

#[async_trait]
impl Get for FirewallsResource {
    type Output = Firewall;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: u64) -> Result<HcloudResponse<Firewall>> {
        self.transport
            .get::<FirewallEnvelope>(&format!("firewalls/{id}"))
            .await
    }
}

#[async_trait]
impl List for FirewallsResource {
    type Item = Firewall;

    #[tracing::instrument(skip(self))]
    async fn list(&self, page: u32, per_page: u32) -> Result<HcloudResponse<Vec<Firewall>>> {
        self.transport
            .get_with_query::<FirewallListEnvelope, _>(
                "firewalls",
                &ListParams::new(page, per_page),
            )
            .await
    }
}

#[async_trait]
impl Update for FirewallsResource {
    type Params = UpdateFirewallParams;
    type Output = Firewall;

    #[tracing::instrument(skip(self, params))]
    async fn update(
        &self,
        id: u64,
        params: UpdateFirewallParams,
    ) -> Result<HcloudResponse<Firewall>> {
        self.transport
            .put::<FirewallEnvelope, _>(&format!("firewalls/{id}"), &params)
            .await
    }
}
