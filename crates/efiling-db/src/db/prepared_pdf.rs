use async_trait::async_trait;
use efiling_core::models::PreparedPdf;
use efiling_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::traits::PreparedPdfStore;

/// Repository for prepared (encrypted) filing packages. Read-only: the
/// packages are written by the document generation flow, not by this service.
#[derive(Clone)]
pub struct PreparedPdfRepository {
    pool: PgPool,
}

impl PreparedPdfRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreparedPdfStore for PreparedPdfRepository {
    async fn find(&self, id: Uuid) -> Result<Option<PreparedPdf>, AppError> {
        let row = sqlx::query_as::<_, PreparedPdf>(
            r#"
            SELECT id, key_id, data, json_data, created_at
            FROM prepared_pdfs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
