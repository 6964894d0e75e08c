//! Content codec: recovers the protection order package from its encrypted
//! storage form.

use std::sync::Arc;

use bytes::Bytes;
use efiling_core::models::PreparedPdf;
use efiling_core::Keyring;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("malformed package metadata: {0}")]
    MalformedMetadata(String),
}

/// The decoded package: the raw PDF and its case metadata, augmented with
/// the owning application's identifier.
#[derive(Debug)]
pub struct PackageContent {
    pub pdf: Bytes,
    pub metadata: serde_json::Value,
}

/// Decrypts and deserializes prepared filing packages. The keyring is
/// injected at construction; nothing here reaches for ambient state.
#[derive(Clone)]
pub struct ContentCodec {
    keyring: Arc<Keyring>,
}

impl ContentCodec {
    pub fn new(keyring: Arc<Keyring>) -> Self {
        Self { keyring }
    }

    pub fn decode_package(
        &self,
        prepared: &PreparedPdf,
        application_id: Uuid,
    ) -> Result<PackageContent, CodecError> {
        let pdf = self
            .keyring
            .decrypt(&prepared.key_id, &prepared.data)
            .map_err(|e| CodecError::Decryption(e.to_string()))?;

        let metadata_bytes = self
            .keyring
            .decrypt(&prepared.key_id, &prepared.json_data)
            .map_err(|e| CodecError::Decryption(e.to_string()))?;

        let mut metadata: serde_json::Value = serde_json::from_slice(&metadata_bytes)
            .map_err(|e| CodecError::MalformedMetadata(e.to_string()))?;

        if let Some(object) = metadata.as_object_mut() {
            object.insert(
                "applicationId".to_string(),
                serde_json::Value::String(application_id.to_string()),
            );
        }

        Ok(PackageContent {
            pdf: Bytes::from(pdf),
            metadata,
        })
    }
}
