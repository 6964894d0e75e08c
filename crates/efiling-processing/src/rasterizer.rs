//! Rasterization seam: converts image attachments into PDF documents.
//!
//! The conversion itself is an external capability; this trait is its
//! contract. The HTTP client lives in the services crate, and tests use
//! in-memory implementations.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

/// One image payload for a conversion call.
#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
    pub base64: String,
    #[serde(rename = "type")]
    pub image_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    #[error("conversion request failed: {0}")]
    Transport(String),

    #[error("conversion service error: {0}")]
    Service(String),
}

/// Converts images into a single PDF document.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn image_to_pdf(&self, images: Vec<ImagePayload>) -> Result<Bytes, RasterizeError>;
}
