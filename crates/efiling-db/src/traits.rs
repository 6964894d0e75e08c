//! Store traits for the records the submission pipeline reads and writes.
//!
//! The orchestrator and handlers depend on these seams rather than on the
//! Postgres repositories directly, so tests can run against in-memory
//! implementations and the persistence engine stays a collaborator.

use async_trait::async_trait;
use efiling_core::models::{Application, EFilingSubmission, PreparedPdf};
use efiling_core::AppError;
use uuid::Uuid;

/// Read/write access to application records. The pipeline only writes back
/// `last_submission_id` after a successful submission.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Load an application, scoped to its owning user.
    async fn find_for_user(
        &self,
        application_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Application>, AppError>;

    async fn set_last_submission(
        &self,
        application_id: Uuid,
        submission_id: &str,
    ) -> Result<(), AppError>;
}

/// Read-only access to prepared (encrypted) filing packages.
#[async_trait]
pub trait PreparedPdfStore: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<PreparedPdf>, AppError>;
}

/// Lifecycle of submission records. Every mutation refreshes `last_updated`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a Created-state record before any external call is made.
    async fn create(
        &self,
        transaction_id: Uuid,
        application_id: Uuid,
    ) -> Result<EFilingSubmission, AppError>;

    /// Record the submission identifier returned by the upload phase.
    async fn record_upload(&self, transaction_id: Uuid, submission_id: &str)
        -> Result<(), AppError>;

    /// Refresh `last_updated` after the package submission phase completes.
    async fn touch(&self, transaction_id: Uuid) -> Result<(), AppError>;

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<EFilingSubmission>, AppError>;

    /// Record the package number/URL supplied by the filing office callback.
    async fn set_package(
        &self,
        id: Uuid,
        package_number: &str,
        package_url: &str,
    ) -> Result<(), AppError>;
}
