//! Location and datacenter models.

use serde::{Deserialize, Serialize};

/// A physical location servers can be placed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    /// Unique identifier such as `fsn1`.
    pub name: String,
    pub description: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Network zone the location belongs to (e.g. `eu-central`).
    pub network_zone: String,
}

/// A datacenter within a [`Location`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: u64,
    /// Unique identifier such as `fsn1-dc14`.
    pub name: String,
    pub description: String,
    pub location: Location,
}
