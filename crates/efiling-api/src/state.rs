//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`. Stores and external capabilities are held
//! as trait objects, so tests can wire in-memory implementations.

use std::sync::Arc;

use efiling_db::{ApplicationStore, PreparedPdfStore, SubmissionStore};
use efiling_processing::{DocumentNormalizer, UploadValidator};
use efiling_services::{ContentCodec, FilingParser, SubmissionService};
use sqlx::PgPool;

/// Database pool and the record stores.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub applications: Arc<dyn ApplicationStore>,
    pub prepared_pdfs: Arc<dyn PreparedPdfStore>,
    pub submissions: Arc<dyn SubmissionStore>,
}

/// The submission pipeline's collaborators, wired once at startup.
#[derive(Clone)]
pub struct FilingState {
    pub validator: Arc<UploadValidator>,
    pub normalizer: Arc<DocumentNormalizer>,
    pub codec: Arc<ContentCodec>,
    pub parser: Arc<FilingParser>,
    pub submission_service: Arc<SubmissionService>,
}

/// Main application state: aggregates sub-states for dependency injection.
/// Deliberately carries no configuration: handlers only see their wired
/// collaborators, and tests construct this directly with in-memory stores.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub filing: FilingState,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for FilingState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.filing.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
