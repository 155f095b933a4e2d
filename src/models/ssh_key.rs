//! SSH key model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Labels;

/// A public SSH key stored in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
    /// MD5 fingerprint of the public key.
    pub fingerprint: String,
    pub public_key: String,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
}

/// Parameters for uploading an SSH key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSshKeyParams {
    pub name: String,
    pub public_key: String,
    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
}
