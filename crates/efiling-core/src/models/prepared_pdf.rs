use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An encrypted rendering of the generated protection order package.
/// Immutable once created; read-only to the submission pipeline.
///
/// `data` holds the encrypted PDF bytes and `json_data` the encrypted case
/// metadata; both are decrypted with the keyring entry named by `key_id`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PreparedPdf {
    pub id: Uuid,
    pub key_id: String,
    pub data: Vec<u8>,
    pub json_data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}
