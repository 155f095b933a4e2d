//! `/servers` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Action, AttachToNetworkParams, CreateServerParams, CreatedServer, Server};
use crate::pagination::ListParams;
use crate::response::{
    ActionEnvelope, CreatedServerEnvelope, HcloudResponse, ServerEnvelope, ServerListEnvelope,
};
use crate::traits::{Get, List};
use crate::transport::Transport;

#[derive(Serialize)]
struct RebuildBody<'a> {
    image: &'a str,
}

#[derive(Serialize)]
struct ChangeProtectionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rebuild: Option<bool>,
}

#[derive(Serialize)]
struct DetachFromNetworkBody {
    network: u64,
}

/// Access to servers.
///
/// Most operations start an asynchronous [`Action`]; await it with
/// [`ActionsResource::poll`](crate::resources::ActionsResource::poll).
#[derive(Debug, Clone)]
pub struct ServersResource {
    transport: Arc<Transport>,
}

impl ServersResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Create a server.
    ///
    /// The response carries the server, the `create_server` action, any
    /// follow-up actions and, when no SSH key was given, the root password.
    ///
    /// # Errors
    ///
    /// Returns a client error for invalid parameters (e.g. an unknown
    /// server type), or any transport or decode error.
    #[tracing::instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create(
        &self,
        params: &CreateServerParams,
    ) -> Result<HcloudResponse<CreatedServer>> {
        self.transport
            .post::<CreatedServerEnvelope, _>("servers", params)
            .await
    }

    /// Delete a server.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<HcloudResponse<Action>> {
        self.transport
            .delete::<ActionEnvelope>(&format!("servers/{id}"))
            .await
    }

    /// Start a server.
    #[tracing::instrument(skip(self))]
    pub async fn power_on(&self, id: u64) -> Result<HcloudResponse<Action>> {
        self.action(id, "poweron").await
    }

    /// Cut power to a server.
    #[tracing::instrument(skip(self))]
    pub async fn power_off(&self, id: u64) -> Result<HcloudResponse<Action>> {
        self.action(id, "poweroff").await
    }

    /// Reinstall a server from an image ID or name.
    #[tracing::instrument(skip(self))]
    pub async fn rebuild(&self, id: u64, image: &str) -> Result<HcloudResponse<Action>> {
        self.action_with_body(id, "rebuild", &RebuildBody { image })
            .await
    }

    /// Change delete and rebuild protection. `None` leaves a flag as is.
    #[tracing::instrument(skip(self))]
    pub async fn change_protection(
        &self,
        id: u64,
        delete: Option<bool>,
        rebuild: Option<bool>,
    ) -> Result<HcloudResponse<Action>> {
        self.action_with_body(
            id,
            "change_protection",
            &ChangeProtectionBody { delete, rebuild },
        )
        .await
    }

    /// Attach a server to a private network.
    #[tracing::instrument(skip(self, params), fields(network = params.network))]
    pub async fn attach_to_network(
        &self,
        id: u64,
        params: &AttachToNetworkParams,
    ) -> Result<HcloudResponse<Action>> {
        self.action_with_body(id, "attach_to_network", params).await
    }

    /// Detach a server from a private network.
    #[tracing::instrument(skip(self))]
    pub async fn detach_from_network(
        &self,
        id: u64,
        network: u64,
    ) -> Result<HcloudResponse<Action>> {
        self.action_with_body(id, "detach_from_network", &DetachFromNetworkBody { network })
            .await
    }

    async fn action(&self, id: u64, verb: &str) -> Result<HcloudResponse<Action>> {
        self.transport
            .post_empty::<ActionEnvelope>(&format!("servers/{id}/actions/{verb}"))
            .await
    }

    async fn action_with_body<B: Serialize + ?Sized>(
        &self,
        id: u64,
        verb: &str,
        body: &B,
    ) -> Result<HcloudResponse<Action>> {
        self.transport
            .post::<ActionEnvelope, _>(&format!("servers/{id}/actions/{verb}"), body)
            .await
    }
}

#[async_trait]
impl Get for ServersResource {
    type Output = Server;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: u64) -> Result<HcloudResponse<Server>> {
        self.transport
            .get::<ServerEnvelope>(&format!("servers/{id}"))
            .await
    }
}

#[async_trait]
impl List for ServersResource {
    type Item = Server;

    #[tracing::instrument(skip(self))]
    async fn list(&self, page: u32, per_page: u32) -> Result<HcloudResponse<Vec<Server>>> {
        self.transport
            .get_with_query::<ServerListEnvelope, _>("servers", &ListParams::new(page, per_page))
            .await
    }
}
