//! `/networks` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Action, CreateNetworkParams, Network, Route, Subnet, UpdateNetworkParams};
use crate::pagination::ListParams;
use crate::response::{ActionEnvelope, HcloudResponse, NetworkEnvelope, NetworkListEnvelope};
use crate::traits::{Get, List, Update};
use crate::transport::Transport;

#[derive(Serialize)]
struct DeleteSubnetBody<'a> {
    ip_range: &'a str,
}

#[derive(Serialize)]
struct ChangeProtectionBody {
    delete: bool,
}

/// Access to private networks.
#[derive(Debug, Clone)]
pub struct NetworksResource {
    transport: Arc<Transport>,
}

impl NetworksResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Create a network.
    #[tracing::instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create(&self, params: &CreateNetworkParams) -> Result<HcloudResponse<Network>> {
        self.transport
            .post::<NetworkEnvelope, _>("networks", params)
            .await
    }

    /// Delete a network. The API answers without a body.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<HcloudResponse<()>> {
        self.transport.delete_empty(&format!("networks/{id}")).await
    }

    /// Add a subnet.
    #[tracing::instrument(skip(self))]
    pub async fn add_subnet(&self, id: u64, subnet: &Subnet) -> Result<HcloudResponse<Action>> {
        self.action(id, "add_subnet", subnet).await
    }

    /// Delete the subnet with the given IP range.
    #[tracing::instrument(skip(self))]
    pub async fn delete_subnet(&self, id: u64, ip_range: &str) -> Result<HcloudResponse<Action>> {
        self.action(id, "delete_subnet", &DeleteSubnetBody { ip_range })
            .await
    }

    /// Add a static route.
    #[tracing::instrument(skip(self))]
    pub async fn add_route(&self, id: u64, route: &Route) -> Result<HcloudResponse<Action>> {
        self.action(id, "add_route", route).await
    }

    /// Delete a static route.
    #[tracing::instrument(skip(self))]
    pub async fn delete_route(&self, id: u64, route: &Route) -> Result<HcloudResponse<Action>> {
        self.action(id, "delete_route", route).await
    }

    /// Enable or disable delete protection.
    #[tracing::instrument(skip(self))]
    pub async fn change_protection(&self, id: u64, delete: bool) -> Result<HcloudResponse<Action>> {
        self.action(id, "change_protection", &ChangeProtectionBody { delete })
            .await
    }

    async fn action<B: Serialize + ?Sized>(
        &self,
        id: u64,
        verb: &str,
        body: &B,
    ) -> Result<HcloudResponse<Action>> {
        self.transport
            .post::<ActionEnvelope, _>(&format!("networks/{id}/actions/{verb}"), body)
            .await
    }
}

#[async_trait]
impl Get for NetworksResource {
    type Output = Network;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: u64) -> Result<HcloudResponse<Network>> {
        self.transport
            .get::<NetworkEnvelope>(&format!("networks/{id}"))
            .await
    }
}

#[async_trait]
impl List for NetworksResource {
    type Item = Network;

    #[tracing::instrument(skip(self))]
    async fn list(&self, page: u32, per_page: u32) -> Result<HcloudResponse<Vec<Network>>> {
        self.transport
            .get_with_query::<NetworkListEnvelope, _>("networks", &ListParams::new(page, per_page))
            .await
    }
}

#[async_trait]
impl Update for NetworksResource {
    type Params = UpdateNetworkParams;
    type Output = Network;

    #[tracing::instrument(skip(self, params))]
    async fn update(&self, id: u64, params: UpdateNetworkParams) -> Result<HcloudResponse<Network>> {
        self.transport
            .put::<NetworkEnvelope, _>(&format!("networks/{id}"), &params)
            .await
    }
}
