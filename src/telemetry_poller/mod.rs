//! TelemetryPoller - Generation-Tagged Recurring Stats Poll
//!
//! ## Responsibilities
//!
//! - Per-active-camera recurring fetch of vehicle counts
//! - Start/stop lifecycle tied to selection changes
//! - Stale-response discarding across camera switches
//! - Republishing the derived view to display surfaces
//!
//! ## State machine
//!
//! Idle (no active camera) or Polling(camera_id, generation). Every
//! selection notification is applied as a transition and bumps the
//! generation; a fetch result publishes only while its generation is still
//! current, so the displayed snapshot always belongs to the currently
//! active camera - never to one that was active a few ticks ago.

use crate::aggregator::{aggregate, TrafficView};
use crate::models::{CameraId, VehicleStats};
use crate::stats_client::StatsClient;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// Latest successful poll result for the active camera
///
/// Superseded, never merged, by each new poll result.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub camera_id: CameraId,
    pub stats: VehicleStats,
    pub view: TrafficView,
    pub fetched_at: DateTime<Utc>,
}

struct PollerInner {
    stats: Arc<StatsClient>,
    interval: Duration,
    /// Bumped on every transition; in-flight responses carry the value they
    /// were issued under
    generation: AtomicU64,
    snapshot_tx: watch::Sender<Option<TelemetrySnapshot>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

/// TelemetryPoller instance
pub struct TelemetryPoller {
    inner: Arc<PollerInner>,
    control: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryPoller {
    /// Create new TelemetryPoller
    pub fn new(stats: Arc<StatsClient>, interval: Duration) -> Self {
        let (snapshot_tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(PollerInner {
                stats,
                interval,
                generation: AtomicU64::new(0),
                snapshot_tx,
                timer: Mutex::new(None),
            }),
            control: Mutex::new(None),
        }
    }

    /// Start the control loop over selection changes.
    ///
    /// Every notification is a transition, including re-selection of the
    /// current camera, which restarts its timer under a fresh generation.
    pub async fn start(&self, mut selection_rx: watch::Receiver<Option<CameraId>>) {
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            loop {
                let active = *selection_rx.borrow_and_update();
                transition(&inner, active).await;
                if selection_rx.changed().await.is_err() {
                    break;
                }
            }
            // Selection owner went away; release the timer.
            transition(&inner, None).await;
        });
        *self.control.lock().await = Some(handle);

        tracing::info!("Telemetry poller started");
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<Option<TelemetrySnapshot>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Latest published snapshot
    pub fn current_snapshot(&self) -> Option<TelemetrySnapshot> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Cancel the control and timer tasks
    pub async fn shutdown(&self) {
        if let Some(handle) = self.control.lock().await.take() {
            handle.abort();
        }
        if let Some(handle) = self.inner.timer.lock().await.take() {
            handle.abort();
        }
        tracing::info!("Telemetry poller stopped");
    }
}

/// Apply a selection value as a state transition
async fn transition(inner: &Arc<PollerInner>, active: Option<CameraId>) {
    // Supersede in-flight responses from the previous state.
    let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

    if let Some(handle) = inner.timer.lock().await.take() {
        handle.abort();
    }

    match active {
        Some(camera_id) => {
            tracing::info!(camera_id, generation, "Polling started");
            let timer_inner = inner.clone();
            let handle = tokio::spawn(async move {
                let mut ticker = tokio::time::interval(timer_inner.interval);
                loop {
                    ticker.tick().await;
                    // Detached fetch: a slow response never delays the next
                    // tick.
                    let poll_inner = timer_inner.clone();
                    tokio::spawn(async move {
                        poll_once(&poll_inner, camera_id, generation).await;
                    });
                }
            });
            *inner.timer.lock().await = Some(handle);
        }
        None => {
            // With no active camera there is nothing the displayed snapshot
            // could refer to.
            inner.snapshot_tx.send_replace(None);
            tracing::info!(generation, "Polling idle");
        }
    }
}

/// One fetch issued under `generation`
async fn poll_once(inner: &PollerInner, camera_id: CameraId, generation: u64) {
    match inner.stats.fetch(camera_id).await {
        Ok(stats) => {
            if inner.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(camera_id, generation, "Discarding stale stats response");
                return;
            }
            let snapshot = TelemetrySnapshot {
                camera_id,
                view: aggregate(&stats),
                stats,
                fetched_at: Utc::now(),
            };
            // Re-checked under the channel lock: a camera switch between
            // fetch completion and publish must not resurface old data.
            inner.snapshot_tx.send_if_modified(|slot| {
                if inner.generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = Some(snapshot);
                true
            });
        }
        Err(e) => {
            // Transient: the last snapshot stays up, the next tick retries.
            tracing::warn!(camera_id, generation, error = %e, "Stats poll failed");
        }
    }
}
