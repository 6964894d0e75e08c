//! HTTP client for the image-to-PDF rasterization service.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use efiling_processing::{ImagePayload, Rasterizer, RasterizeError};
use serde::Serialize;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct ConvertRequest {
    images: Vec<ImagePayload>,
}

/// Rasterizer backed by the standalone PDF service. Posts the image payloads
/// and receives the raw PDF bytes back.
pub struct HttpRasterizer {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpRasterizer {
    pub fn new(base_url: impl Into<String>) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl Rasterizer for HttpRasterizer {
    async fn image_to_pdf(&self, images: Vec<ImagePayload>) -> Result<Bytes, RasterizeError> {
        let url = format!("{}/image-to-pdf", self.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .json(&ConvertRequest { images })
            .send()
            .await
            .map_err(|e| RasterizeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Rasterization service returned an error");
            return Err(RasterizeError::Service(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| RasterizeError::Transport(e.to_string()))
    }
}
