use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filer's case record. Owned by the surrounding persistence layer; the
/// submission pipeline reads it and writes back only `last_submission_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Set once the protection order package has been generated. A submission
    /// may only be created after this is set.
    pub prepared_pdf_id: Option<Uuid>,
    /// External submission identifier of the most recent successful
    /// submission, used by the package callback to find its record.
    pub last_submission_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Application {
    pub fn has_prepared_package(&self) -> bool {
        self.prepared_pdf_id.is_some()
    }
}
