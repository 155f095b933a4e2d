//! `/actions` endpoints and action polling.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Action;
use crate::poll::{poll_action, PollOptions};
use crate::response::{ActionEnvelope, HcloudResponse};
use crate::traits::Get;
use crate::transport::Transport;

/// Access to actions.
#[derive(Debug, Clone)]
pub struct ActionsResource {
    transport: Arc<Transport>,
}

impl ActionsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Wait for an action to finish, sleeping with tokio between fetches.
    ///
    /// A finished action is returned whatever its outcome; check
    /// [`Action::is_success`] or [`Action::error`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hcloud_sdk::{HetznerClient, PollOptions};
    ///
    /// # async fn example(client: &HetznerClient) -> hcloud_sdk::Result<()> {
    /// let action = client.servers().power_on(42).await?.result;
    /// let action = client.actions().poll(action.id, PollOptions::default()).await?;
    /// assert!(action.is_finished());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first fetch error, or [`HcloudError::PollTimeout`](crate::HcloudError::PollTimeout)
    /// if the action is still running after `options.max_attempts` fetches.
    #[tracing::instrument(skip(self))]
    pub async fn poll(&self, id: u64, options: PollOptions) -> Result<Action> {
        self.poll_with(id, options, tokio::time::sleep).await
    }

    /// Like [`poll`](Self::poll) with a caller-supplied sleep function.
    pub async fn poll_with<S, SFut>(&self, id: u64, options: PollOptions, sleep: S) -> Result<Action>
    where
        S: FnMut(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        poll_action(
            id,
            options,
            || async move { self.get(id).await.map(HcloudResponse::into_result) },
            sleep,
        )
        .await
    }
}

#[async_trait]
impl Get for ActionsResource {
    type Output = Action;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: u64) -> Result<HcloudResponse<Action>> {
        self.transport
            .get::<ActionEnvelope>(&format!("actions/{id}"))
            .await
    }
}
