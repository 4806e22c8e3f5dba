//! ConsoleCore - Component Wiring and Mutation API
//!
//! ## Responsibilities
//!
//! - Owns the registry, selection and poller
//! - Catalog-load seeding and deletion-cascade transition rules
//! - Read surface for display surfaces

use crate::active_selection::ActiveSelection;
use crate::camera_registry::CameraRegistry;
use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::models::{Camera, CameraDraft, CameraId};
use crate::stats_client::StatsClient;
use crate::telemetry_poller::{TelemetryPoller, TelemetrySnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Operator console core
pub struct ConsoleCore {
    registry: Arc<CameraRegistry>,
    selection: Arc<ActiveSelection>,
    poller: TelemetryPoller,
}

impl ConsoleCore {
    /// Wire the components and start the poller control loop
    pub async fn start(config: ConsoleConfig) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let registry = Arc::new(CameraRegistry::new(config.backend_url.clone(), timeout));
        let selection = Arc::new(ActiveSelection::new(registry.clone()));
        let stats = Arc::new(StatsClient::new(config.backend_url.clone(), timeout));
        let poller = TelemetryPoller::new(stats, Duration::from_millis(config.poll_interval_ms));

        poller.start(selection.subscribe()).await;

        Self {
            registry,
            selection,
            poller,
        }
    }

    /// Fetch the catalog and reconcile the selection.
    ///
    /// Seeds the first camera when nothing is selected yet, and moves off an
    /// id that no longer exists remotely. A failed fetch changes nothing; it
    /// is retried only by explicit operator action.
    pub async fn load_cameras(&self) -> Result<Vec<Camera>> {
        let cameras = self.registry.list().await?;
        self.reconcile_selection().await?;
        Ok(cameras)
    }

    /// Register a camera; the new camera becomes active
    pub async fn add_camera(&self, draft: CameraDraft) -> Result<Camera> {
        let camera = self.registry.create(draft).await?;
        self.selection.select(Some(camera.id)).await?;
        Ok(camera)
    }

    /// Delete a camera, cascading the selection in the same logical step.
    ///
    /// A second delete of the same id surfaces `NotFound` rather than
    /// silent success; the selection is reconciled either way, so the
    /// active id never dangles.
    pub async fn remove_camera(&self, id: CameraId) -> Result<()> {
        let result = self.registry.remove(id).await;
        self.reconcile_selection().await?;
        result
    }

    /// Explicit selection; re-selecting the active id forces a poll restart
    pub async fn select_camera(&self, target: Option<CameraId>) -> Result<()> {
        self.selection.select(target).await
    }

    /// Last-known catalog
    pub async fn cameras(&self) -> Vec<Camera> {
        self.registry.cached_cameras().await
    }

    /// Currently active camera id
    pub fn current_camera(&self) -> Option<CameraId> {
        self.selection.current()
    }

    /// Latest derived snapshot
    pub fn current_snapshot(&self) -> Option<TelemetrySnapshot> {
        self.poller.current_snapshot()
    }

    /// Subscribe to derived snapshot updates
    pub fn subscribe_snapshots(&self) -> watch::Receiver<Option<TelemetrySnapshot>> {
        self.poller.subscribe()
    }

    /// Opaque video stream locator for a camera
    pub fn video_feed_url(&self, id: CameraId) -> String {
        self.registry.video_feed_url(id)
    }

    /// Cancel the polling tasks
    pub async fn shutdown(&self) {
        self.poller.shutdown().await;
    }

    /// Keep the active id inside the cached catalog: seed the first camera
    /// when nothing is selected, move to the first remaining one when the
    /// active camera disappeared, clear when the catalog is empty.
    async fn reconcile_selection(&self) -> Result<()> {
        let catalog = self.registry.cached_cameras().await;
        match self.selection.current() {
            None => {
                if let Some(first) = catalog.first() {
                    self.selection.select(Some(first.id)).await?;
                }
            }
            Some(active) if !catalog.iter().any(|c| c.id == active) => {
                self.selection.select(catalog.first().map(|c| c.id)).await?;
            }
            Some(_) => {}
        }
        Ok(())
    }
}
