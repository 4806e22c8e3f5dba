//! ActiveSelection - Single Active Camera
//!
//! Holds at most one active camera id and notifies dependents on every
//! successful selection, including re-selection of the current id (that is
//! the forced poll-restart path after recovery).

use crate::camera_registry::CameraRegistry;
use crate::error::{Error, Result};
use crate::models::CameraId;
use std::sync::Arc;
use tokio::sync::watch;

/// ActiveSelection instance
pub struct ActiveSelection {
    registry: Arc<CameraRegistry>,
    tx: watch::Sender<Option<CameraId>>,
}

impl ActiveSelection {
    /// Create new ActiveSelection with no camera selected
    pub fn new(registry: Arc<CameraRegistry>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { registry, tx }
    }

    /// Select a camera, or clear the selection with `None`.
    ///
    /// An id that is not in the last-known catalog is rejected, so the
    /// active id never references an unknown camera. Every accepted call
    /// notifies subscribers, even when the id is unchanged.
    pub async fn select(&self, target: Option<CameraId>) -> Result<()> {
        if let Some(id) = target {
            let known = self
                .registry
                .cached_cameras()
                .await
                .iter()
                .any(|c| c.id == id);
            if !known {
                return Err(Error::NotFound(format!(
                    "camera {} is not in the catalog",
                    id
                )));
            }
        }

        tracing::info!(camera_id = ?target, "Active camera changed");
        self.tx.send_replace(target);

        Ok(())
    }

    /// Currently selected camera id
    pub fn current(&self) -> Option<CameraId> {
        *self.tx.borrow()
    }

    /// Subscribe to selection changes
    pub fn subscribe(&self) -> watch::Receiver<Option<CameraId>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Camera;
    use chrono::Utc;
    use std::time::Duration;

    fn camera(id: CameraId) -> Camera {
        Camera {
            id,
            name: format!("cam{}", id),
            source_url: format!("rtsp://cams.test/{}", id),
            location: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    async fn selection_with(ids: &[CameraId]) -> ActiveSelection {
        let registry = Arc::new(CameraRegistry::new(
            "http://localhost:8000",
            Duration::from_secs(1),
        ));
        registry
            .seed_catalog(ids.iter().map(|&id| camera(id)).collect())
            .await;
        ActiveSelection::new(registry)
    }

    #[tokio::test]
    async fn test_select_known_camera() {
        let selection = selection_with(&[1, 2]).await;
        selection.select(Some(2)).await.unwrap();
        assert_eq!(selection.current(), Some(2));
    }

    #[tokio::test]
    async fn test_select_unknown_camera_rejected() {
        let selection = selection_with(&[1]).await;
        let err = selection.select(Some(99)).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(selection.current(), None);
    }

    #[tokio::test]
    async fn test_clearing_is_always_allowed() {
        let selection = selection_with(&[]).await;
        selection.select(None).await.unwrap();
        assert_eq!(selection.current(), None);
    }

    #[tokio::test]
    async fn test_reselection_notifies_subscribers() {
        let selection = selection_with(&[1]).await;
        let mut rx = selection.subscribe();

        selection.select(Some(1)).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some(1));

        // Same id again still wakes subscribers: forced restart.
        selection.select(Some(1)).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some(1));
    }
}
