//! Client for the external filing hub: the two protocol calls the pipeline
//! depends on (document upload, then package submission).

use std::time::Duration;

use async_trait::async_trait;
use efiling_core::models::Attachment;
use serde::Deserialize;
use uuid::Uuid;

use super::parsing::FilingData;

/// Result of the document upload phase. `submission_id` absent means the
/// phase failed; `message` carries the hub's explanation when it gave one.
#[derive(Debug, Clone, Default)]
pub struct UploadOutcome {
    pub submission_id: Option<String>,
    pub message: Option<String>,
}

/// Result of the package submission phase. `redirect_url` absent means the
/// phase failed.
#[derive(Debug, Clone, Default)]
pub struct SubmitOutcome {
    pub redirect_url: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EFilingClientError {
    #[error("e-filing request failed: {0}")]
    Transport(String),

    #[error("e-filing response could not be decoded: {0}")]
    Decode(String),
}

/// The two-phase filing protocol. Implemented over HTTP in production and
/// by in-memory stubs in tests.
#[async_trait]
pub trait EFilingClient: Send + Sync {
    /// Phase one: upload the normalized attachment list under a fresh
    /// transaction identifier.
    async fn upload_documents(
        &self,
        universal_id: &str,
        transaction_id: Uuid,
        attachments: &[Attachment],
    ) -> Result<UploadOutcome, EFilingClientError>;

    /// Phase two: submit the package and obtain the redirect URL the filer
    /// completes payment/review at.
    async fn generate_submission_url(
        &self,
        universal_id: &str,
        transaction_id: Uuid,
        submission_id: &str,
        filing_data: &FilingData,
    ) -> Result<SubmitOutcome, EFilingClientError>;
}

/// Filing hub connection settings.
#[derive(Debug, Clone)]
pub struct EFilingHubConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "submissionId")]
    submission_id: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateUrlResponse {
    #[serde(rename = "efilingUrl")]
    efiling_url: Option<String>,
    message: Option<String>,
}

/// reqwest-backed hub client.
pub struct HttpEFilingClient {
    http_client: reqwest::Client,
    config: EFilingHubConfig,
}

impl HttpEFilingClient {
    pub fn new(config: EFilingHubConfig) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl EFilingClient for HttpEFilingClient {
    async fn upload_documents(
        &self,
        universal_id: &str,
        transaction_id: Uuid,
        attachments: &[Attachment],
    ) -> Result<UploadOutcome, EFilingClientError> {
        let mut form = reqwest::multipart::Form::new();
        for attachment in attachments {
            let part = reqwest::multipart::Part::bytes(attachment.data.to_vec())
                .file_name(attachment.filename.clone())
                .mime_str(&attachment.content_type)
                .map_err(|e| EFilingClientError::Decode(e.to_string()))?;
            form = form.part("files", part);
        }

        let response = self
            .http_client
            .post(self.url("/submission/documents"))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header("X-Transaction-Id", transaction_id.to_string())
            .header("X-User-Id", universal_id)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EFilingClientError::Transport(e.to_string()))?;

        // The hub reports failures in the same JSON envelope as successes,
        // so decode the body regardless of status.
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| EFilingClientError::Decode(e.to_string()))?;

        Ok(UploadOutcome {
            submission_id: body.submission_id,
            message: body.message,
        })
    }

    async fn generate_submission_url(
        &self,
        universal_id: &str,
        transaction_id: Uuid,
        submission_id: &str,
        filing_data: &FilingData,
    ) -> Result<SubmitOutcome, EFilingClientError> {
        let response = self
            .http_client
            .post(self.url(&format!("/submission/{}/generateUrl", submission_id)))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header("X-Transaction-Id", transaction_id.to_string())
            .header("X-User-Id", universal_id)
            .json(filing_data)
            .send()
            .await
            .map_err(|e| EFilingClientError::Transport(e.to_string()))?;

        let body: GenerateUrlResponse = response
            .json()
            .await
            .map_err(|e| EFilingClientError::Decode(e.to_string()))?;

        Ok(SubmitOutcome {
            redirect_url: body.efiling_url,
            message: body.message,
        })
    }
}
