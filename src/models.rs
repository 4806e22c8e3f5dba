//! Wire types for the consumed REST surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Camera identifier assigned by the remote registry
pub type CameraId = i64;

/// Catalog entry as returned by the registry
///
/// Never mutated in place by the console; updates replace the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    /// Unique across the catalog
    pub source_url: String,
    #[serde(default)]
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Creation request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDraft {
    pub name: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Point-in-time vehicle counts for one camera
///
/// Absent fields mean "no data yet", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleStats {
    #[serde(default)]
    pub car: u64,
    #[serde(default)]
    pub motorcycle: u64,
    #[serde(default)]
    pub bus: u64,
    #[serde(default)]
    pub truck: u64,
    /// Vehicles per minute, computed upstream
    #[serde(default)]
    pub flow_rate: u64,
    /// Unique vehicles seen upstream since stream start
    #[serde(default)]
    pub total_vehicles: u64,
}
