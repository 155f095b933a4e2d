//! Image model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Labels, Protection};

/// A disk image (system image, snapshot, backup or app).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,

    /// Unique name, only set for system images.
    #[serde(default)]
    pub name: Option<String>,

    /// Image type: `system`, `app`, `snapshot` or `backup`.
    #[serde(rename = "type")]
    pub image_type: String,

    #[serde(default)]
    pub description: Option<String>,

    /// `available`, `creating` or `unavailable`.
    pub status: String,

    #[serde(default)]
    pub architecture: Option<String>,

    #[serde(default)]
    pub os_flavor: Option<String>,

    #[serde(default)]
    pub os_version: Option<String>,

    /// Size of the disk contained in the image in GB.
    #[serde(default)]
    pub disk_size: Option<f64>,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub labels: Labels,

    #[serde(default)]
    pub rapid_deploy: Option<bool>,

    /// Point in time when the image is considered deprecated.
    #[serde(default)]
    pub deprecated: Option<DateTime<Utc>>,

    /// Size of the image file in GB.
    #[serde(default)]
    pub image_size: Option<f64>,

    /// Server the image is bound to (backups only).
    #[serde(default)]
    pub bound_to: Option<u64>,

    #[serde(default)]
    pub created_from: Option<serde_json::Value>,

    #[serde(default)]
    pub deleted: Option<DateTime<Utc>>,

    #[serde(default)]
    pub protection: Option<Protection>,
}

impl Image {
    /// Whether this is a snapshot created by the user.
    pub fn is_snapshot(&self) -> bool {
        self.image_type == "snapshot"
    }
}
