//! Types shared by several resources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User-defined key/value labels attached to a resource.
pub type Labels = HashMap<String, String>;

/// Protection flags of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Protection {
    /// Whether the resource is protected from deletion.
    pub delete: bool,

    /// Whether the resource is protected from rebuilds (servers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebuild: Option<bool>,
}
