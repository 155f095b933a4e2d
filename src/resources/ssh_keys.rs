//! `/ssh_keys` endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateSshKeyParams, SshKey};
use crate::pagination::ListParams;
use crate::response::{HcloudResponse, SshKeyEnvelope, SshKeyListEnvelope};
use crate::traits::{Get, List};
use crate::transport::Transport;

/// Access to SSH keys.
#[derive(Debug, Clone)]
pub struct SshKeysResource {
    transport: Arc<Transport>,
}

impl SshKeysResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Upload a public key.
    #[tracing::instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create(&self, params: &CreateSshKeyParams) -> Result<HcloudResponse<SshKey>> {
        self.transport
            .post::<SshKeyEnvelope, _>("ssh_keys", params)
            .await
    }

    /// Delete a key. The API answers without a body.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<HcloudResponse<()>> {
        self.transport.delete_empty(&format!("ssh_keys/{id}")).await
    }
}

#[async_trait]
impl Get for SshKeysResource {
    type Output = SshKey;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: u64) -> Result<HcloudResponse<SshKey>> {
        self.transport
            .get::<SshKeyEnvelope>(&format!("ssh_keys/{id}"))
            .await
    }
}

#[async_trait]
impl List for SshKeysResource {
    type Item = SshKey;

    #[tracing::instrument(skip(self))]
    async fn list(&self, page: u32, per_page: u32) -> Result<HcloudResponse<Vec<SshKey>>> {
        self.transport
            .get_with_query::<SshKeyListEnvelope, _>("ssh_keys", &ListParams::new(page, per_page))
            .await
    }
}
