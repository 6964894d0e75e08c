use async_trait::async_trait;
use efiling_core::models::Application;
use efiling_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::traits::ApplicationStore;

/// Repository for application records.
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for ApplicationRepository {
    async fn find_for_user(
        &self,
        application_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Application>, AppError> {
        // Dynamic SQLx queries to avoid requiring DATABASE_URL/sqlx prepare
        let row = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, user_id, prepared_pdf_id, last_submission_id, created_at, last_updated
            FROM applications
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(application_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn set_last_submission(
        &self,
        application_id: Uuid,
        submission_id: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE applications
            SET last_submission_id = $2, last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(application_id)
        .bind(submission_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
