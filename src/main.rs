//! TrafficWatch console runner
//!
//! Headless entry point: loads the camera catalog, drives the telemetry
//! poll for the active camera and logs every derived view update.

use trafficwatch::config::ConsoleConfig;
use trafficwatch::console::ConsoleCore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trafficwatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TrafficWatch console v{}", env!("CARGO_PKG_VERSION"));

    let config = ConsoleConfig::default();
    tracing::info!(
        backend_url = %config.backend_url,
        poll_interval_ms = config.poll_interval_ms,
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let console = ConsoleCore::start(config).await;

    match console.load_cameras().await {
        Ok(cameras) => {
            tracing::info!(count = cameras.len(), "Camera catalog loaded");
            if let Some(active) = console.current_camera() {
                tracing::info!(
                    camera_id = active,
                    video_feed = %console.video_feed_url(active),
                    "Active camera seeded"
                );
            }
        }
        Err(e) => {
            // The catalog stays in its last-known state (empty on first
            // load) until an operator retries; the console keeps running.
            tracing::error!(error = %e, "Initial catalog load failed");
        }
    }

    // Stand-in display surface: log each republished view.
    let mut snapshots = console.subscribe_snapshots();
    let display = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            match snapshot {
                Some(s) => {
                    tracing::info!(
                        camera_id = s.camera_id,
                        total = s.view.total,
                        automobiles = s.view.automobiles,
                        motorcycles = s.view.motorcycles,
                        flow_rate = s.view.flow_rate,
                        total_vehicles = s.view.total_vehicles,
                        "Telemetry updated"
                    );
                }
                None => {
                    tracing::info!("No active camera");
                }
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    console.shutdown().await;
    display.abort();

    Ok(())
}
