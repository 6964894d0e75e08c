//! Two-phase submission orchestration.
//!
//! Drives the filing protocol against the external hub: mint a transaction,
//! persist a pending record, upload the documents, then submit the package
//! for a redirect URL. The record is written at every phase boundary so a
//! crash or failure leaves an auditable trail; failed attempts are never
//! rolled back and there is no compensation call for documents uploaded
//! before a failed submission phase.
//!
//! Concurrent submissions for one application are not mutually excluded:
//! each request mints its own transaction and `last_submission_id` is
//! last-writer-wins. Retries are the caller's responsibility and always
//! produce a fresh transaction record.

use std::sync::Arc;

use efiling_core::models::{Application, Attachment};
use efiling_core::AppError;
use efiling_db::{ApplicationStore, SubmissionStore};
use uuid::Uuid;

use super::client::{EFilingClient, SubmitOutcome, UploadOutcome};
use super::parsing::FilingData;

/// Fallback when the upload phase fails without a message from the hub.
pub const UPLOAD_FAILED_MESSAGE: &str = "Document Upload Failed.";

/// Fallback when the submission phase fails without a message from the hub.
pub const SUBMIT_FAILED_MESSAGE: &str = "Package submission failed.";

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Upload phase failed; the record remains in its created state.
    #[error("{0}")]
    UploadFailed(String),

    /// Submission phase failed; the record remains uploaded and the
    /// documents stay orphaned on the hub side.
    #[error("{0}")]
    SubmissionFailed(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

/// What a successful submission returns to the caller.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub transaction_id: Uuid,
    pub submission_id: String,
    pub redirect_url: String,
    pub message: Option<String>,
}

/// Orchestrates one submission attempt through both protocol phases.
pub struct SubmissionService {
    applications: Arc<dyn ApplicationStore>,
    submissions: Arc<dyn SubmissionStore>,
    client: Arc<dyn EFilingClient>,
}

impl SubmissionService {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        submissions: Arc<dyn SubmissionStore>,
        client: Arc<dyn EFilingClient>,
    ) -> Self {
        Self {
            applications,
            submissions,
            client,
        }
    }

    /// Run the two-phase protocol for one application.
    ///
    /// A record is persisted before the first external call so the attempt
    /// is attributable even if the process dies mid-protocol. On success the
    /// application's `last_submission_id` points at this attempt.
    pub async fn submit(
        &self,
        universal_id: &str,
        application: &Application,
        attachments: &[Attachment],
        filing_data: &FilingData,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let transaction_id = Uuid::new_v4();
        self.submissions
            .create(transaction_id, application.id)
            .await?;
        tracing::info!(
            transaction_id = %transaction_id,
            application_id = %application.id,
            attachment_count = attachments.len(),
            "Submission transaction created"
        );

        let submission_id = self
            .upload_phase(universal_id, transaction_id, attachments)
            .await?;
        self.submissions
            .record_upload(transaction_id, &submission_id)
            .await?;
        tracing::info!(
            transaction_id = %transaction_id,
            submission_id = %submission_id,
            "Documents uploaded"
        );

        let (redirect_url, message) = self
            .submit_phase(universal_id, transaction_id, &submission_id, filing_data)
            .await?;

        self.applications
            .set_last_submission(application.id, &submission_id)
            .await?;
        self.submissions.touch(transaction_id).await?;
        tracing::info!(
            transaction_id = %transaction_id,
            submission_id = %submission_id,
            "Package submitted"
        );

        Ok(SubmissionReceipt {
            transaction_id,
            submission_id,
            redirect_url,
            message,
        })
    }

    async fn upload_phase(
        &self,
        universal_id: &str,
        transaction_id: Uuid,
        attachments: &[Attachment],
    ) -> Result<String, SubmissionError> {
        // A transport/decode failure is treated the same as an absent result.
        let outcome = match self
            .client
            .upload_documents(universal_id, transaction_id, attachments)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    transaction_id = %transaction_id,
                    error = %err,
                    "Document upload call failed"
                );
                UploadOutcome::default()
            }
        };

        match outcome.submission_id {
            Some(submission_id) => Ok(submission_id),
            None => Err(SubmissionError::UploadFailed(
                outcome
                    .message
                    .unwrap_or_else(|| UPLOAD_FAILED_MESSAGE.to_string()),
            )),
        }
    }

    async fn submit_phase(
        &self,
        universal_id: &str,
        transaction_id: Uuid,
        submission_id: &str,
        filing_data: &FilingData,
    ) -> Result<(String, Option<String>), SubmissionError> {
        let outcome = match self
            .client
            .generate_submission_url(universal_id, transaction_id, submission_id, filing_data)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    transaction_id = %transaction_id,
                    submission_id = %submission_id,
                    error = %err,
                    "Package submission call failed"
                );
                SubmitOutcome::default()
            }
        };

        match outcome.redirect_url {
            Some(url) => Ok((url, outcome.message)),
            None => Err(SubmissionError::SubmissionFailed(
                outcome
                    .message
                    .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.to_string()),
            )),
        }
    }
}
