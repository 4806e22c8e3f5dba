//! TrafficWatch Operator Console Core
//!
//! Camera lifecycle and live-telemetry coordination for a traffic-camera
//! monitoring network.
//!
//! ## Architecture (5 Components)
//!
//! 1. CameraRegistry - CRUD facade over the remote camera catalog
//! 2. ActiveSelection - single active camera, change notification
//! 3. TelemetryPoller - generation-tagged recurring vehicle-count poll
//! 4. Aggregator - pure snapshot to derived-view transform
//! 5. ConsoleCore - owned state store wiring the above
//!
//! ## Design Principles
//!
//! - The active id, if present, always references a cataloged camera
//! - One writer per shared value: the poller owns the snapshot, the
//!   selection owns the active id
//! - Poll responses from a superseded camera are discarded by generation,
//!   never displayed

pub mod active_selection;
pub mod aggregator;
pub mod camera_registry;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod stats_client;
pub mod telemetry_poller;

pub use error::{Error, Result};
