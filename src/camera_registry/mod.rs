//! CameraRegistry - Remote Catalog CRUD Facade
//!
//! ## Responsibilities
//!
//! - Camera catalog reads and writes against the backend registry
//! - Last-known catalog cache for failure-tolerant display
//! - Video feed locator construction

use crate::error::{Error, Result};
use crate::models::{Camera, CameraDraft, CameraId};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::sync::RwLock;

/// CameraRegistry instance
pub struct CameraRegistry {
    client: reqwest::Client,
    base_url: String,
    /// Last successfully fetched catalog, creation order
    catalog: RwLock<Vec<Camera>>,
}

impl CameraRegistry {
    /// Create new CameraRegistry
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            catalog: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the catalog from the backend.
    ///
    /// On success the cached catalog is replaced. On failure the cache keeps
    /// the last known good list, so callers can tell "empty" from "failed"
    /// and keep rendering the previous catalog.
    pub async fn list(&self) -> Result<Vec<Camera>> {
        let url = format!("{}/cameras/", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(Error::Api(format!("Camera list failed: {}", resp.status())));
        }

        let cameras: Vec<Camera> = resp.json().await?;

        {
            let mut catalog = self.catalog.write().await;
            *catalog = cameras.clone();
        }

        tracing::debug!(count = cameras.len(), "Camera catalog refreshed");

        Ok(cameras)
    }

    /// Register a new camera.
    ///
    /// A source locator already present in the last-known catalog is refused
    /// before the network write, so a rejected create leaves the catalog
    /// unchanged. The backend remains the authority: its duplicate rejection
    /// maps to the same `Conflict`.
    pub async fn create(&self, draft: CameraDraft) -> Result<Camera> {
        if draft.name.trim().is_empty() {
            return Err(Error::Validation("camera name is required".into()));
        }
        if draft.source_url.trim().is_empty() {
            return Err(Error::Validation("source URL is required".into()));
        }

        {
            let catalog = self.catalog.read().await;
            if catalog.iter().any(|c| c.source_url == draft.source_url) {
                return Err(Error::Conflict(format!(
                    "source URL already registered: {}",
                    draft.source_url
                )));
            }
        }

        let url = format!("{}/cameras/", self.base_url);
        let resp = self.client.post(&url).json(&draft).send().await?;

        let status = resp.status();
        if status == StatusCode::CONFLICT {
            return Err(Error::Conflict(format!(
                "source URL already registered: {}",
                draft.source_url
            )));
        }
        if !status.is_success() {
            return Err(Error::Api(format!("Camera create failed: {}", status)));
        }

        let camera: Camera = resp.json().await?;

        self.catalog.write().await.push(camera.clone());

        tracing::info!(camera_id = camera.id, name = %camera.name, "Camera registered");

        Ok(camera)
    }

    /// Delete a camera.
    ///
    /// Deleting an id the backend no longer knows reports `NotFound`, never
    /// silent success; the cached entry is pruned in that case too, since
    /// the remote does not have it either way.
    pub async fn remove(&self, id: CameraId) -> Result<()> {
        let url = format!("{}/cameras/{}", self.base_url, id);
        let resp = self.client.delete(&url).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            self.catalog.write().await.retain(|c| c.id != id);
            return Err(Error::NotFound(format!("camera {} not found", id)));
        }
        if !status.is_success() {
            return Err(Error::Api(format!("Camera delete failed: {}", status)));
        }

        self.catalog.write().await.retain(|c| c.id != id);

        tracing::info!(camera_id = id, "Camera deleted");

        Ok(())
    }

    /// Last-known catalog (fast read, no network)
    pub async fn cached_cameras(&self) -> Vec<Camera> {
        self.catalog.read().await.clone()
    }

    /// Opaque stream locator for the video-rendering collaborator.
    ///
    /// The console only addresses the stream by camera id; the content is
    /// never inspected here.
    pub fn video_feed_url(&self, id: CameraId) -> String {
        format!("{}/video_feed/{}", self.base_url, id)
    }

    #[cfg(test)]
    pub(crate) async fn seed_catalog(&self, cameras: Vec<Camera>) {
        *self.catalog.write().await = cameras;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_feed_url_is_id_addressed() {
        let registry = CameraRegistry::new("http://localhost:8000", Duration::from_secs(1));
        assert_eq!(
            registry.video_feed_url(7),
            "http://localhost:8000/video_feed/7"
        );
    }
}
