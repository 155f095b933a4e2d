//! Action model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An asynchronous operation started by a state-changing request.
///
/// Actions are returned by most mutating endpoints and can be awaited with
/// [`ActionsResource::poll`](crate::resources::ActionsResource::poll).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action ID.
    pub id: u64,

    /// Command that was executed (e.g. `start_server`).
    pub command: String,

    /// Current status.
    pub status: ActionStatus,

    /// Progress in percent (0-100).
    pub progress: u32,

    /// When the action was started.
    pub started: DateTime<Utc>,

    /// When the action finished, if it has.
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,

    /// Failure details. Only present when the action failed.
    #[serde(default, deserialize_with = "deserialize_action_error")]
    pub error: Option<ActionError>,

    /// Resources the action operates on.
    #[serde(default)]
    pub resources: Vec<ActionResource>,
}

impl Action {
    /// Whether the action reached a final status (`success` or `error`).
    pub fn is_finished(&self) -> bool {
        matches!(self.status, ActionStatus::Success | ActionStatus::Error)
    }

    /// Whether the action finished successfully.
    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

/// Status of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Running,
    Success,
    Error,
    /// A status this client does not know about. Treated as non-terminal.
    #[serde(other)]
    Unknown,
}

/// Failure details of an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

/// A resource referenced by an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResource {
    pub id: u64,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// The API sends `{"code": "", "message": ""}` for actions without an error.
fn deserialize_action_error<'de, D>(deserializer: D) -> Result<Option<ActionError>, D::Error>
where
    D: Deserializer<'de>,
{
    let error = Option::<ActionError>::deserialize(deserializer)?;
    Ok(error.filter(|e| !e.code.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action_json(status: &str, error: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 42,
            "command": "start_server",
            "status": status,
            "progress": 100,
            "started": "2024-01-01T00:00:00+00:00",
            "finished": "2024-01-01T00:00:05+00:00",
            "error": error,
            "resources": [{"id": 7, "type": "server"}]
        })
    }

    #[test]
    fn test_action_deserialize_success() {
        let action: Action =
            serde_json::from_value(action_json("success", json!({"code": "", "message": ""})))
                .expect("Failed to deserialize action");

        assert_eq!(action.id, 42);
        assert_eq!(action.command, "start_server");
        assert_eq!(action.status, ActionStatus::Success);
        assert!(action.is_finished());
        assert!(action.is_success());
        assert!(action.error.is_none());
        assert!(action.finished.is_some());
        assert_eq!(action.resources[0].resource_type, "server");
    }

    #[test]
    fn test_action_deserialize_error_details() {
        let action: Action = serde_json::from_value(action_json(
            "error",
            json!({"code": "action_failed", "message": "Server start failed"}),
        ))
        .expect("Failed to deserialize action");

        assert!(action.is_finished());
        assert!(!action.is_success());
        let error = action.error.expect("error should be present");
        assert_eq!(error.code, "action_failed");
        assert_eq!(error.message, "Server start failed");
    }

    #[test]
    fn test_action_missing_optional_fields() {
        let action: Action = serde_json::from_value(json!({
            "id": 1,
            "command": "create_server",
            "status": "running",
            "progress": 0,
            "started": "2024-01-01T00:00:00Z"
        }))
        .expect("Failed to deserialize action");

        assert_eq!(action.status, ActionStatus::Running);
        assert!(!action.is_finished());
        assert!(action.finished.is_none());
        assert!(action.error.is_none());
        assert!(action.resources.is_empty());
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let action: Action = serde_json::from_value(action_json("paused", json!(null)))
            .expect("Failed to deserialize action");

        assert_eq!(action.status, ActionStatus::Unknown);
        assert!(!action.is_finished());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = serde_json::from_value::<Action>(json!({
            "id": 1,
            "status": "running",
            "progress": 0,
            "started": "2024-01-01T00:00:00Z"
        }));

        assert!(result.is_err());
    }
}
