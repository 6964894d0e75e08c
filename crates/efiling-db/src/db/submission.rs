use async_trait::async_trait;
use efiling_core::models::EFilingSubmission;
use efiling_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::traits::SubmissionStore;

/// Repository for submission lifecycle records. Rows are inserted before the
/// first external protocol call and only ever updated afterwards; nothing
/// deletes them, so the table doubles as the submission audit trail.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn create(
        &self,
        transaction_id: Uuid,
        application_id: Uuid,
    ) -> Result<EFilingSubmission, AppError> {
        let row = sqlx::query_as::<_, EFilingSubmission>(
            r#"
            INSERT INTO efiling_submissions (id, transaction_id, application_id)
            VALUES (gen_random_uuid(), $1, $2)
            RETURNING id, transaction_id, application_id, submission_id,
                      package_number, package_url, created_at, last_updated
            "#,
        )
        .bind(transaction_id)
        .bind(application_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            transaction_id = %transaction_id,
            application_id = %application_id,
            "Submission record created"
        );

        Ok(row)
    }

    async fn record_upload(
        &self,
        transaction_id: Uuid,
        submission_id: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE efiling_submissions
            SET submission_id = $2, last_updated = NOW()
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .bind(submission_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn touch(&self, transaction_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE efiling_submissions
            SET last_updated = NOW()
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<EFilingSubmission>, AppError> {
        let row = sqlx::query_as::<_, EFilingSubmission>(
            r#"
            SELECT id, transaction_id, application_id, submission_id,
                   package_number, package_url, created_at, last_updated
            FROM efiling_submissions
            WHERE submission_id = $1
            ORDER BY last_updated DESC
            LIMIT 1
            "#,
        )
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn set_package(
        &self,
        id: Uuid,
        package_number: &str,
        package_url: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE efiling_submissions
            SET package_number = $2, package_url = $3, last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(package_number)
        .bind(package_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
