//! StatsClient - Vehicle Count Adapter
//!
//! ## Responsibilities
//!
//! - Fetch the per-camera counts snapshot from the backend
//! - Response parsing

use crate::error::{Error, Result};
use crate::models::{CameraId, VehicleStats};
use reqwest::StatusCode;
use std::time::Duration;

/// Vehicle stats HTTP client
pub struct StatsClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Create new StatsClient
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current counts snapshot for a camera
    pub async fn fetch(&self, camera_id: CameraId) -> Result<VehicleStats> {
        let url = format!("{}/stats/{}", self.base_url, camera_id);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("camera {} not found", camera_id)));
        }
        if !status.is_success() {
            return Err(Error::Api(format!("Stats fetch failed: {}", status)));
        }

        Ok(resp.json().await?)
    }
}
