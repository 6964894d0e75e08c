//! Service and repository wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use efiling_core::{Config, Keyring};
use efiling_db::{ApplicationRepository, PreparedPdfRepository, SubmissionRepository};
use efiling_processing::{DocumentNormalizer, UploadValidator};
use efiling_services::{
    ContentCodec, EFilingHubConfig, FilingParser, HttpEFilingClient, HttpRasterizer,
    SubmissionService,
};
use sqlx::PgPool;

use crate::state::{AppState, DbState, FilingState};

/// Construct every repository, client, and service the handlers depend on.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let applications = Arc::new(ApplicationRepository::new(pool.clone()));
    let prepared_pdfs = Arc::new(PreparedPdfRepository::new(pool.clone()));
    let submissions = Arc::new(SubmissionRepository::new(pool.clone()));

    let keyring = Arc::new(
        Keyring::from_spec(config.encryption_keys())
            .map_err(|e| anyhow::anyhow!("Failed to build encryption keyring: {}", e))?,
    );

    let rasterizer = Arc::new(
        HttpRasterizer::new(config.pdf_service_url())
            .context("Failed to create rasterizer client")?,
    );

    let efiling_client = Arc::new(
        HttpEFilingClient::new(EFilingHubConfig {
            base_url: config.efiling_base_url().to_string(),
            client_id: config.efiling_client_id().to_string(),
            client_secret: config.efiling_client_secret().to_string(),
            timeout_seconds: config.efiling_timeout_seconds(),
        })
        .context("Failed to create e-filing hub client")?,
    );

    let submission_service = Arc::new(SubmissionService::new(
        applications.clone(),
        submissions.clone(),
        efiling_client,
    ));

    let state = AppState {
        db: DbState {
            pool,
            applications,
            prepared_pdfs,
            submissions,
        },
        filing: FilingState {
            validator: Arc::new(UploadValidator::default()),
            normalizer: Arc::new(DocumentNormalizer::new(rasterizer)),
            codec: Arc::new(ContentCodec::new(keyring)),
            parser: Arc::new(FilingParser::new(
                config.efiling_app_name(),
                config.efiling_return_base_url(),
            )),
            submission_service,
        },
    };

    Ok(Arc::new(state))
}
