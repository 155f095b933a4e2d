//! Waiting for actions to finish.

use std::future::Future;
use std::time::Duration;

use crate::error::{HcloudError, Result};
use crate::models::Action;

/// Default delay between two status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of status fetches before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

/// How often and how long to poll an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between two fetches.
    pub interval: Duration,
    /// Maximum number of fetches, including the first one.
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollOptions {
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Fetch an action until it reaches `success` or `error`.
///
/// The action is returned as-is once finished, including when its status is
/// `error`. Fetch errors propagate immediately. After `max_attempts` fetches
/// that all observed a running action, [`HcloudError::PollTimeout`] is
/// returned. `sleep` is awaited between fetches.
///
/// # Errors
///
/// Returns the first fetch error, or `PollTimeout` when the attempt budget
/// is exhausted.
pub async fn poll_action<F, Fut, S, SFut>(
    action_id: u64,
    options: PollOptions,
    mut fetch: F,
    mut sleep: S,
) -> Result<Action>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Action>>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt: u32 = 1;

    loop {
        let action = fetch().await?;

        if action.is_finished() {
            tracing::debug!(action_id, attempt, status = ?action.status, "Action finished");
            return Ok(action);
        }

        if attempt >= options.max_attempts {
            return Err(HcloudError::PollTimeout {
                action_id,
                max_attempts: options.max_attempts,
            });
        }

        tracing::debug!(
            action_id,
            attempt,
            progress = action.progress,
            "Action still running"
        );
        sleep(options.interval).await;
        attempt += 1;
    }
}
